use ndarray::Array2;

/// Apply Standard scaling: (x - mean) / std
///
/// # Arguments
/// * `features` - Feature matrix to scale
///
/// # Returns
/// * Scaled feature matrix with zero mean and unit variance per column
///
/// # Note
/// Constant columns (std == 0) are left unscaled so they never turn into
/// NaN or Inf
pub fn standard_scale(mut features: Array2<f64>) -> Array2<f64> {
    for col_idx in 0..features.ncols() {
        let col = features.column(col_idx);
        let mean = col.mean().unwrap_or(0.0);
        let std = col.std(0.0);

        if std.abs() < f64::EPSILON {
            continue;
        }

        for row_idx in 0..features.nrows() {
            features[[row_idx, col_idx]] = (features[[row_idx, col_idx]] - mean) / std;
        }
    }

    features
}
