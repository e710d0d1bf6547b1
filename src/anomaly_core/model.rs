use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::feature::validate_features;
use super::tree::{expected_path_length, IsolationTree};
use crate::utils::{validate_ensemble_size, DetectError};

/// Cap on the per-tree subsample size; bounds tree height and training cost
const SUBSAMPLE_CAP: usize = 256;

/// Run Isolation Forest anomaly scoring
///
/// # Arguments
/// * `features` - Standardized feature matrix (rows=samples, cols=features)
/// * `ensemble_size` - Number of trees in the forest
/// * `seed` - Controls every subsample and split draw; identical input and
///   config reproduce identical scores
///
/// # Returns
/// * `Ok(scores)` - One anomaly score per row in (0, 1]; ~0.5 means
///   average, values approaching 1 mean highly isolated
/// * `Err(DetectError)` - If validation fails
///
/// # Algorithm
/// Each tree is grown over a subsample of min(256, n_rows) row indices
/// drawn without replacement, splitting on a random non-constant feature
/// at a random value within the subset's range, down to a height limit of
/// ceil(log2(sample_size)). A row's score is
/// 2^(−avg_path / c(sample_size)) where avg_path averages the corrected
/// path length across all trees.
pub fn run_isolation_forest(
    features: &Array2<f64>,
    ensemble_size: usize,
    seed: u64,
) -> Result<Vec<f64>, DetectError> {
    validate_ensemble_size(ensemble_size)?;
    validate_features(features)?;

    let n_rows = features.nrows();
    let sample_size = n_rows.min(SUBSAMPLE_CAP);
    let height_limit = (sample_size as f64).log2().ceil() as usize;
    let mut rng = StdRng::seed_from_u64(seed);

    log::debug!(
        "building isolation forest: {} trees, sample size {}, height limit {}",
        ensemble_size,
        sample_size,
        height_limit
    );

    // Per-tree path contributions go into a fixed accumulator indexed by
    // row, so aggregation never depends on completion order
    let mut path_totals = vec![0.0; n_rows];
    for _ in 0..ensemble_size {
        let sample = index::sample(&mut rng, n_rows, sample_size).into_vec();
        let tree = IsolationTree::fit(features, &sample, height_limit, &mut rng);
        for (row_idx, total) in path_totals.iter_mut().enumerate() {
            *total += tree.path_length(features.row(row_idx));
        }
    }

    let norm = expected_path_length(sample_size);
    let scores: Vec<f64> = path_totals
        .iter()
        .map(|total| {
            let avg_path = total / ensemble_size as f64;
            2f64.powf(-avg_path / norm)
        })
        .collect();

    let score_min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let score_max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    log::debug!("anomaly score range: [{:.6}, {:.6}]", score_min, score_max);

    Ok(scores)
}
