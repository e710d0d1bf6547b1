use crate::dataset::Dataset;

/// Statistics computed from a dataset column
#[derive(Debug, Clone)]
pub struct Statistics {
    pub field: String,
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl Statistics {
    /// Compute statistics for a numeric field, skipping missing cells
    ///
    /// Returns None when the column has no usable numeric values.
    pub fn compute(dataset: &Dataset, field: &str) -> Option<Self> {
        let values: Vec<f64> = dataset
            .data
            .iter()
            .filter_map(|point| point.get_numeric(field))
            .collect();

        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let missing = dataset.len() - count;
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;
        let std = variance.sqrt();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Statistics {
            field: field.to_string(),
            count,
            missing,
            mean,
            std,
            min,
            max,
            sum,
        })
    }
}
