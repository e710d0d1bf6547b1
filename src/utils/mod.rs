/// Utility modules for error handling, validation and scaling
pub mod error;
pub mod scaling;
pub mod validate;

// Re-export commonly used types
pub use error::DetectError;
pub use scaling::standard_scale;
pub use validate::{validate_contamination, validate_ensemble_size};
