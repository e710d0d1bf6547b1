use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::Rng;

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Expected path length c(n) to isolate one of n samples in a random
/// binary tree: 2·H(n−1) − 2(n−1)/n with H(m) ≈ ln(m) + γ
pub(crate) fn expected_path_length(n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let nf = n as f64;
    2.0 * ((nf - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (nf - 1.0) / nf
}

/// Node of an isolation tree
pub(crate) enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        /// Subset size reaching this leaf, kept for the path correction
        size: usize,
        /// Depth at which the leaf was created
        depth: usize,
    },
}

/// A single isolation tree over a subsample of rows
pub(crate) struct IsolationTree {
    pub(crate) root: TreeNode,
}

impl IsolationTree {
    /// Grow a tree over the given row indices of the feature matrix
    pub fn fit(
        data: &Array2<f64>,
        sample: &[usize],
        height_limit: usize,
        rng: &mut StdRng,
    ) -> Self {
        Self {
            root: grow(data, sample, 0, height_limit, rng),
        }
    }

    /// Path length for a row: edges traversed to its leaf, plus the
    /// expected extra length for the subset still grouped at that leaf
    pub fn path_length(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] < *threshold { left } else { right };
                }
                TreeNode::Leaf { size, depth } => {
                    return *depth as f64 + expected_path_length(*size);
                }
            }
        }
    }
}

fn grow(
    data: &Array2<f64>,
    indices: &[usize],
    depth: usize,
    height_limit: usize,
    rng: &mut StdRng,
) -> TreeNode {
    if indices.len() <= 1 || depth >= height_limit {
        return TreeNode::Leaf {
            size: indices.len(),
            depth,
        };
    }

    // Candidate split features: columns non-constant within this subset
    let mut candidates: Vec<(usize, f64, f64)> = Vec::new();
    for feature in 0..data.ncols() {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &i in indices {
            let v = data[[i, feature]];
            min = min.min(v);
            max = max.max(v);
        }
        if max > min {
            candidates.push((feature, min, max));
        }
    }

    // All feature values constant in the subset, nothing left to split on
    if candidates.is_empty() {
        return TreeNode::Leaf {
            size: indices.len(),
            depth,
        };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = min + rng.gen::<f64>() * (max - min);

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    for &i in indices {
        if data[[i, feature]] < threshold {
            left_rows.push(i);
        } else {
            right_rows.push(i);
        }
    }

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(grow(data, &left_rows, depth + 1, height_limit, rng)),
        right: Box::new(grow(data, &right_rows, depth + 1, height_limit, rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use rand::SeedableRng;

    #[test]
    fn test_expected_path_length_base_cases() {
        assert_eq!(expected_path_length(0), 0.0);
        assert_eq!(expected_path_length(1), 0.0);
        // c(2) = 2(ln(1) + γ) − 1
        assert!((expected_path_length(2) - (2.0 * EULER_MASCHERONI - 1.0)).abs() < 1e-10);
    }

    #[test]
    fn test_expected_path_length_grows_with_n() {
        assert!(expected_path_length(256) > expected_path_length(64));
        assert!(expected_path_length(64) > expected_path_length(2));
        // c(256) ≈ 10.24 per the harmonic estimator
        assert!((expected_path_length(256) - 10.244).abs() < 0.01);
    }

    #[test]
    fn test_constant_data_yields_leaf_root() {
        let data = arr2(&[[3.0, 7.0], [3.0, 7.0], [3.0, 7.0], [3.0, 7.0]]);
        let indices: Vec<usize> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let tree = IsolationTree::fit(&data, &indices, 8, &mut rng);

        match tree.root {
            TreeNode::Leaf { size, depth } => {
                assert_eq!(size, 4);
                assert_eq!(depth, 0);
            }
            TreeNode::Split { .. } => panic!("constant data must not be split"),
        }

        // Path length is then just the subset correction
        let path = tree.path_length(data.row(0));
        assert!((path - expected_path_length(4)).abs() < 1e-10);
    }

    #[test]
    fn test_zero_variance_column_never_selected_for_split() {
        // Column 0 is constant; every split must use column 1
        let data = arr2(&[
            [5.0, 1.0],
            [5.0, 2.0],
            [5.0, 3.0],
            [5.0, 4.0],
            [5.0, 5.0],
            [5.0, 6.0],
            [5.0, 7.0],
            [5.0, 8.0],
        ]);
        let indices: Vec<usize> = (0..8).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let tree = IsolationTree::fit(&data, &indices, 3, &mut rng);

        fn assert_no_split_on(node: &TreeNode, banned: usize) {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                assert_ne!(*feature, banned);
                assert_no_split_on(left, banned);
                assert_no_split_on(right, banned);
            }
        }
        assert_no_split_on(&tree.root, 0);
    }

    #[test]
    fn test_fit_is_deterministic_for_same_seed() {
        let data = arr2(&[
            [1.0, 2.0],
            [1.5, 2.5],
            [0.5, 1.5],
            [9.0, 9.0],
            [1.2, 2.2],
            [0.8, 1.8],
        ]);
        let indices: Vec<usize> = (0..6).collect();

        let mut rng_a = StdRng::seed_from_u64(99);
        let tree_a = IsolationTree::fit(&data, &indices, 4, &mut rng_a);
        let mut rng_b = StdRng::seed_from_u64(99);
        let tree_b = IsolationTree::fit(&data, &indices, 4, &mut rng_b);

        for row in data.rows() {
            assert_eq!(tree_a.path_length(row), tree_b.path_length(row));
        }
    }

    #[test]
    fn test_height_limit_bounds_leaf_depth() {
        let data = arr2(&[
            [1.0],
            [2.0],
            [3.0],
            [4.0],
            [5.0],
            [6.0],
            [7.0],
            [8.0],
        ]);
        let indices: Vec<usize> = (0..8).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let tree = IsolationTree::fit(&data, &indices, 2, &mut rng);

        fn max_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { depth, .. } => *depth,
                TreeNode::Split { left, right, .. } => max_depth(left).max(max_depth(right)),
            }
        }
        assert!(max_depth(&tree.root) <= 2);
    }
}
