use std::fmt;

/// Custom error type for detection operations
#[derive(Debug, Clone)]
pub enum DetectError {
    /// A numeric column has no usable values to impute from
    DataQuality(String),
    /// Dataset has no numeric columns to model on
    NoNumericFeatures(String),
    /// Fewer than 2 usable rows after preparation
    InsufficientData(String),
    /// Contamination or ensemble size outside valid range
    InvalidConfig(String),
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::DataQuality(msg) => write!(f, "DataQualityError: {}", msg),
            DetectError::NoNumericFeatures(msg) => write!(f, "NoNumericFeaturesError: {}", msg),
            DetectError::InsufficientData(msg) => write!(f, "InsufficientDataError: {}", msg),
            DetectError::InvalidConfig(msg) => write!(f, "InvalidConfigError: {}", msg),
        }
    }
}

impl std::error::Error for DetectError {}
