use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{validate_contamination, DetectError};

/// Binary anomaly label attached to each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyLabel {
    Normal,
    Anomaly,
}

impl fmt::Display for AnomalyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyLabel::Normal => write!(f, "Normal"),
            AnomalyLabel::Anomaly => write!(f, "Anomaly"),
        }
    }
}

/// Map anomaly scores to binary labels at a contamination rate
///
/// The top `ceil(contamination × n)` scoring rows are labeled Anomaly.
/// Exact ties at the boundary resolve by original row order, earlier rows
/// taking the anomalous side, so labeling is fully deterministic.
///
/// # Returns
/// * `Ok(labels)` - One label per score, aligned with input order
/// * `Err(DetectError::InvalidConfig)` - contamination outside (0, 0.5]
pub fn classify_scores(
    scores: &[f64],
    contamination: f64,
) -> Result<Vec<AnomalyLabel>, DetectError> {
    validate_contamination(contamination)?;

    let n = scores.len();
    let anomaly_count = (contamination * n as f64).ceil() as usize;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut labels = vec![AnomalyLabel::Normal; n];
    for &idx in order.iter().take(anomaly_count) {
        labels[idx] = AnomalyLabel::Anomaly;
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(AnomalyLabel::Normal.to_string(), "Normal");
        assert_eq!(AnomalyLabel::Anomaly.to_string(), "Anomaly");
    }

    #[test]
    fn test_classify_exact_count() {
        let scores = vec![0.9, 0.3, 0.7, 0.2, 0.8, 0.1, 0.4, 0.5, 0.6, 0.35];
        let labels = classify_scores(&scores, 0.3).unwrap();

        // ceil(0.3 × 10) = 3 anomalies
        let anomalies = labels
            .iter()
            .filter(|&&l| l == AnomalyLabel::Anomaly)
            .count();
        assert_eq!(anomalies, 3);

        // Top three scores: 0.9 (idx 0), 0.8 (idx 4), 0.7 (idx 2)
        assert_eq!(labels[0], AnomalyLabel::Anomaly);
        assert_eq!(labels[4], AnomalyLabel::Anomaly);
        assert_eq!(labels[2], AnomalyLabel::Anomaly);
    }

    #[test]
    fn test_classify_ceil_rounds_up() {
        let scores = vec![0.9, 0.5, 0.4];
        let labels = classify_scores(&scores, 0.05).unwrap();

        // ceil(0.05 × 3) = 1
        let anomalies = labels
            .iter()
            .filter(|&&l| l == AnomalyLabel::Anomaly)
            .count();
        assert_eq!(anomalies, 1);
        assert_eq!(labels[0], AnomalyLabel::Anomaly);
    }

    #[test]
    fn test_classify_tie_break_prefers_earlier_rows() {
        // Two rows tied at the boundary score; the earlier row wins
        let scores = vec![0.9, 0.5, 0.5, 0.2];
        let labels = classify_scores(&scores, 0.5).unwrap();

        assert_eq!(labels[0], AnomalyLabel::Anomaly);
        assert_eq!(labels[1], AnomalyLabel::Anomaly);
        assert_eq!(labels[2], AnomalyLabel::Normal);
        assert_eq!(labels[3], AnomalyLabel::Normal);
    }

    #[test]
    fn test_classify_preserves_input_order() {
        let scores = vec![0.1, 0.9, 0.2];
        let labels = classify_scores(&scores, 0.33).unwrap();

        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1], AnomalyLabel::Anomaly);
        assert_eq!(labels[0], AnomalyLabel::Normal);
        assert_eq!(labels[2], AnomalyLabel::Normal);
    }

    #[test]
    fn test_classify_invalid_contamination() {
        let scores = vec![0.1, 0.2];
        assert!(classify_scores(&scores, 0.0).is_err());
        assert!(classify_scores(&scores, 0.6).is_err());
        assert!(classify_scores(&scores, -0.1).is_err());
    }
}
