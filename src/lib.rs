//! Anomaly Engine - unsupervised anomaly detection for tabular data
//!
//! This library ingests tabular numeric datasets and flags rows that are
//! statistically unusual relative to the rest of the data: feature
//! preparation (mean imputation, standardization), isolation-forest
//! scoring and contamination-driven labeling.

pub mod anomaly_core;
pub mod dataset;
pub mod pipeline;
pub mod prepare;
pub mod stats;
pub mod utils;

pub use anomaly_core::AnomalyLabel;
pub use dataset::{DataPoint, Dataset};
pub use pipeline::{detect_anomalies, AnomalyPipeline, DetectConfig, DetectionReport};
pub use stats::Statistics;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
