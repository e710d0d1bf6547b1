use ndarray::Array2;

use crate::utils::DetectError;

/// Validate feature matrix dimensions and values before modeling
///
/// # Arguments
/// * `features` - Standardized feature matrix to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(DetectError)` if the matrix cannot be modeled
pub fn validate_features(features: &Array2<f64>) -> Result<(), DetectError> {
    if features.ncols() == 0 {
        return Err(DetectError::NoNumericFeatures(
            "feature matrix must have at least one column".to_string(),
        ));
    }

    if features.nrows() < 2 {
        return Err(DetectError::InsufficientData(format!(
            "need at least 2 rows to model, got {}",
            features.nrows()
        )));
    }

    // Check for NaN or Inf values
    for value in features.iter() {
        if !value.is_finite() {
            return Err(DetectError::DataQuality(
                "feature matrix contains NaN or Inf values".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_validate_features_valid() {
        let features = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        assert!(validate_features(&features).is_ok());
    }

    #[test]
    fn test_validate_features_single_row() {
        let features = arr2(&[[1.0, 2.0]]);
        let result = validate_features(&features);
        assert!(matches!(result, Err(DetectError::InsufficientData(_))));
    }

    #[test]
    fn test_validate_features_empty_rows() {
        let features = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            validate_features(&features),
            Err(DetectError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_validate_features_empty_cols() {
        let features = Array2::<f64>::zeros((2, 0));
        assert!(matches!(
            validate_features(&features),
            Err(DetectError::NoNumericFeatures(_))
        ));
    }

    #[test]
    fn test_validate_features_with_nan() {
        let features = arr2(&[[1.0, f64::NAN], [3.0, 4.0]]);
        let result = validate_features(&features);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("NaN"));
    }

    #[test]
    fn test_validate_features_with_inf() {
        let features = arr2(&[[1.0, f64::INFINITY], [3.0, 4.0]]);
        assert!(matches!(
            validate_features(&features),
            Err(DetectError::DataQuality(_))
        ));
    }
}
