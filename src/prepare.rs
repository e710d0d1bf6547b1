use ndarray::Array2;

use crate::dataset::{ColumnType, Dataset};
use crate::stats::Statistics;
use crate::utils::{standard_scale, DetectError};

/// Standardized numeric feature matrix derived from a dataset
#[derive(Debug, Clone)]
pub struct PreparedMatrix {
    /// Numeric feature columns, in dataset order
    pub columns: Vec<String>,
    /// Standardized values, one row per data point
    pub matrix: Array2<f64>,
    /// Human-readable notices about preparation (imputation etc.)
    pub notices: Vec<String>,
}

/// Clean and standardize the numeric features of a dataset
///
/// Non-numeric columns are excluded from the matrix but the caller's
/// dataset is never touched. Missing numeric cells are replaced with
/// their column mean before scaling, and the replacement count is
/// reported as a notice.
///
/// # Errors
/// * `DetectError::NoNumericFeatures` - no numeric columns in the manifest
/// * `DetectError::DataQuality` - a numeric column has no usable values
pub fn prepare_features(dataset: &Dataset) -> Result<PreparedMatrix, DetectError> {
    let numeric: Vec<String> = dataset
        .column_types()
        .into_iter()
        .filter(|(_, ty)| *ty == ColumnType::Numeric)
        .map(|(name, _)| name)
        .collect();

    if numeric.is_empty() {
        return Err(DetectError::NoNumericFeatures(
            "dataset has no numeric columns".to_string(),
        ));
    }

    let mut notices = vec![format!(
        "detected {} numeric feature columns: {}",
        numeric.len(),
        numeric.join(", ")
    )];

    // Column means for imputation, from non-missing cells only
    let mut means = Vec::with_capacity(numeric.len());
    let mut imputed = 0;
    for column in &numeric {
        let stats = Statistics::compute(dataset, column).ok_or_else(|| {
            DetectError::DataQuality(format!(
                "column '{}' has no usable values to impute from",
                column
            ))
        })?;
        imputed += stats.missing;
        means.push(stats.mean);
    }

    let mut matrix = Array2::zeros((dataset.len(), numeric.len()));
    for (row_idx, point) in dataset.data.iter().enumerate() {
        for (col_idx, column) in numeric.iter().enumerate() {
            matrix[[row_idx, col_idx]] = point.get_numeric(column).unwrap_or(means[col_idx]);
        }
    }

    if imputed > 0 {
        notices.push(format!(
            "{} missing values imputed with column means",
            imputed
        ));
        log::info!("imputed {} missing values with column means", imputed);
    }

    Ok(PreparedMatrix {
        columns: numeric,
        matrix: standard_scale(matrix),
        notices,
    })
}
