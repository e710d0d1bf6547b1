use anyhow::Context;

use crate::anomaly_core::{classify_scores, run_isolation_forest, AnomalyLabel};
use crate::dataset::Dataset;
use crate::prepare::prepare_features;
use crate::utils::{validate_contamination, validate_ensemble_size, DetectError};

/// Name of the label column appended to the output table
pub const LABEL_COLUMN: &str = "Anomaly";

/// Tunable parameters for a detection run
#[derive(Debug, Clone, Copy)]
pub struct DetectConfig {
    /// Expected fraction of anomalous rows, in (0, 0.5]
    pub contamination: f64,
    /// Seed controlling all stochastic choices
    pub seed: u64,
    /// Number of isolation trees
    pub ensemble_size: usize,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            contamination: 0.05,
            seed: 42,
            ensemble_size: 100,
        }
    }
}

/// Outcome of a detection run
#[derive(Debug, Clone)]
pub struct DetectionReport {
    /// Copy of the input table with the label column appended
    pub dataset: Dataset,
    /// Anomaly score per row, aligned with input order
    pub scores: Vec<f64>,
    /// Label per row, aligned with input order
    pub labels: Vec<AnomalyLabel>,
    /// Human-readable notices from preparation
    pub notices: Vec<String>,
}

impl DetectionReport {
    /// Number of rows labeled anomalous
    pub fn anomaly_count(&self) -> usize {
        self.labels
            .iter()
            .filter(|&&l| l == AnomalyLabel::Anomaly)
            .count()
    }
}

/// Sequences preparation, forest scoring and classification over one
/// dataset, surfacing stage errors unchanged but tagged with the stage
#[derive(Debug, Clone)]
pub struct AnomalyPipeline {
    config: DetectConfig,
}

impl AnomalyPipeline {
    /// Create a pipeline, rejecting invalid configuration up front
    pub fn new(config: DetectConfig) -> Result<Self, DetectError> {
        validate_contamination(config.contamination)?;
        validate_ensemble_size(config.ensemble_size)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Run the full detection pipeline over a dataset
    ///
    /// Each failure is terminal for the run; no stage retries or
    /// downgrades an error into a default.
    pub fn detect(&self, dataset: &Dataset) -> crate::Result<DetectionReport> {
        let prepared = prepare_features(dataset).context("feature preparation stage")?;

        let scores = run_isolation_forest(&prepared.matrix, self.config.ensemble_size, self.config.seed)
            .context("isolation forest stage")?;

        let labels = classify_scores(&scores, self.config.contamination)
            .context("classification stage")?;

        let mut labeled = dataset.clone();
        labeled.add_column(LABEL_COLUMN);
        for (point, label) in labeled.data.iter_mut().zip(&labels) {
            point.add_field(LABEL_COLUMN.to_string(), label.to_string());
        }

        let report = DetectionReport {
            dataset: labeled,
            scores,
            labels,
            notices: prepared.notices,
        };
        log::info!(
            "flagged {} of {} rows as anomalous",
            report.anomaly_count(),
            dataset.len()
        );

        Ok(report)
    }
}

/// Detect anomalies in a tabular dataset
///
/// Core entry point for the presentation layer: returns a copy of the
/// table augmented with the label column, plus notices such as
/// "N missing values imputed with column means".
pub fn detect_anomalies(
    dataset: &Dataset,
    contamination: f64,
    seed: u64,
    ensemble_size: usize,
) -> crate::Result<DetectionReport> {
    let pipeline = AnomalyPipeline::new(DetectConfig {
        contamination,
        seed,
        ensemble_size,
    })
    .context("configuration stage")?;

    pipeline.detect(dataset)
}
