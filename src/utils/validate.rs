use super::error::DetectError;

/// Validate contamination rate is within the valid range (0, 0.5]
///
/// # Arguments
/// * `contamination` - Expected fraction of anomalous rows
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(DetectError::InvalidConfig)` if out of range
pub fn validate_contamination(contamination: f64) -> Result<(), DetectError> {
    if !contamination.is_finite() || contamination <= 0.0 || contamination > 0.5 {
        return Err(DetectError::InvalidConfig(format!(
            "contamination must be in (0, 0.5], got {}",
            contamination
        )));
    }
    Ok(())
}

/// Validate ensemble size is a positive tree count
pub fn validate_ensemble_size(ensemble_size: usize) -> Result<(), DetectError> {
    if ensemble_size == 0 {
        return Err(DetectError::InvalidConfig(
            "ensemble size must be at least 1".to_string(),
        ));
    }
    Ok(())
}
