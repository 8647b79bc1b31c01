//! Metric containers for extraction evaluation

use serde::{Deserialize, Serialize};

/// Safe ratio; 0.0 when the denominator is zero.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Harmonic mean of precision and recall; 0.0 when both are zero.
pub(crate) fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Author- and affiliation-level quality of one extraction run.
/// Accuracies are computed over matched author pairs only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetrics {
    pub author_precision: f64,
    pub author_recall: f64,
    pub author_f1: f64,
    pub affiliation_precision: f64,
    pub affiliation_recall: f64,
    pub affiliation_f1: f64,
    pub normalization_accuracy: f64,
    pub country_accuracy: f64,
    pub org_type_accuracy: f64,
    /// Strict compound metric: normalized organization and country must
    /// both match at once
    pub hierarchical_accuracy: f64,
    /// Predicted authors with no gold counterpart, over all predictions
    pub author_hallucination_rate: f64,
    /// Wrong or fabricated affiliations among predicted non-empty ones
    pub affiliation_hallucination_rate: f64,
    pub papers_evaluated: usize,
    pub papers_skipped: usize,
    pub matched_authors: usize,
    pub total_gold_authors: usize,
    pub total_pred_authors: usize,
}

/// Pipeline-level outcomes, reported by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub e2e_success_rate: f64,
    pub papers_fully_processed: usize,
    pub papers_partial: usize,
    pub papers_failed: usize,
}

/// Wall-clock cost of the run, reported by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineeringMetrics {
    pub total_time_seconds: f64,
    pub avg_time_per_paper: f64,
}

/// Full evaluation output: per-dimension metrics plus the composite score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub timestamp: String,
    pub extraction: ExtractionMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering: Option<EngineeringMetrics>,
    /// Weighted composite in [0, 1]: extraction 0.60, agent 0.25,
    /// engineering 0.15. Absent dimensions contribute 0.0.
    pub overall_quality_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(3.0, 0.0), 0.0);
        assert_eq!(ratio(3.0, 4.0), 0.75);
    }

    #[test]
    fn test_f1_degenerate() {
        assert_eq!(f1(0.0, 0.0), 0.0);
        assert!((f1(1.0, 1.0) - 1.0).abs() < 1e-12);
        assert!((f1(0.5, 1.0) - 2.0 / 3.0).abs() < 1e-12);
    }
}
