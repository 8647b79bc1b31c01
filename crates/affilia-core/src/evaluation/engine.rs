//! Scores predicted paper/author records against the gold standard
//!
//! Author matching is greedy fuzzy bipartite matching in list order: each
//! predicted author takes the first still-unconsumed gold author whose name
//! scores at or above the matching threshold. Affiliation, normalization and
//! country scoring then run over those matched pairs only.

use affilia_domain::{AuthorRecord, GoldAuthor, OrgType, PaperRecord};

use crate::config::ResolverConfig;
use crate::evaluation::gold::GoldStandardStore;
use crate::evaluation::metrics::{
    f1, ratio, AgentMetrics, EngineeringMetrics, EvaluationReport, ExtractionMetrics,
};
use crate::text::fuzzy_eq;

/// Seconds per paper considered "fast enough" when normalizing the
/// engineering term of the composite score.
const BASELINE_SECONDS_PER_PAPER: f64 = 60.0;

pub struct EvaluationEngine {
    gold: GoldStandardStore,
    config: ResolverConfig,
}

#[derive(Debug, Default)]
struct Tally {
    author_tp: usize,
    author_fp: usize,
    author_fn: usize,
    aff_tp: usize,
    aff_fp: usize,
    aff_fn: usize,
    org_correct: usize,
    country_correct: usize,
    org_type_correct: usize,
    hierarchical_correct: usize,
    matched: usize,
    gold_authors: usize,
    papers_evaluated: usize,
    papers_skipped: usize,
}

impl EvaluationEngine {
    pub fn new(gold: GoldStandardStore, config: ResolverConfig) -> Self {
        EvaluationEngine { gold, config }
    }

    pub fn gold(&self) -> &GoldStandardStore {
        &self.gold
    }

    /// Extraction-quality metrics for a batch of predicted papers.
    ///
    /// Predicted papers without a gold annotation are skipped with a
    /// warning; an empty batch or an empty gold store yields all-zero
    /// metrics rather than an error.
    pub fn evaluate_extraction(&self, predictions: &[PaperRecord]) -> ExtractionMetrics {
        let mut tally = Tally::default();

        for paper in predictions {
            let Some(gold_paper) = self.gold.get_paper(&paper.paper_id) else {
                tracing::warn!(paper_id = %paper.paper_id, "no gold annotation, skipping");
                tally.papers_skipped += 1;
                continue;
            };

            tally.papers_evaluated += 1;
            tally.gold_authors += gold_paper.authors.len();
            self.score_paper(&paper.authors, &gold_paper.authors, &mut tally);
        }

        let total_pred: usize = predictions.iter().map(|p| p.authors.len()).sum();
        self.finish(tally, total_pred)
    }

    /// Full report: extraction metrics plus caller-supplied agent and
    /// engineering dimensions, blended into one composite score.
    pub fn evaluate_full(
        &self,
        predictions: &[PaperRecord],
        agent: Option<AgentMetrics>,
        engineering: Option<EngineeringMetrics>,
    ) -> EvaluationReport {
        let extraction = self.evaluate_extraction(predictions);
        let overall_quality_score = composite_score(&extraction, agent.as_ref(), engineering.as_ref());

        EvaluationReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            extraction,
            agent,
            engineering,
            overall_quality_score,
        }
    }

    fn score_paper(&self, predicted: &[AuthorRecord], gold: &[GoldAuthor], tally: &mut Tally) {
        let pairs = self.match_authors(predicted, gold);

        tally.author_tp += pairs.len();
        tally.author_fp += predicted.len() - pairs.len();
        tally.author_fn += gold.len() - pairs.len();

        for &(pred_idx, gold_idx) in &pairs {
            let pred = &predicted[pred_idx];
            let gold = &gold[gold_idx];
            tally.matched += 1;

            self.score_affiliation(pred, gold, tally);
            self.score_normalization(pred, gold, tally);
        }
    }

    /// Greedy pairing of predicted to gold authors by name similarity.
    /// Deterministic: both sides are scanned in list order.
    fn match_authors(&self, predicted: &[AuthorRecord], gold: &[GoldAuthor]) -> Vec<(usize, usize)> {
        let mut consumed = vec![false; gold.len()];
        let mut pairs = Vec::new();

        for (pred_idx, pred) in predicted.iter().enumerate() {
            for (gold_idx, gold_author) in gold.iter().enumerate() {
                if consumed[gold_idx] {
                    continue;
                }
                if fuzzy_eq(&pred.name, &gold_author.name, self.config.author_match_threshold) {
                    consumed[gold_idx] = true;
                    pairs.push((pred_idx, gold_idx));
                    break;
                }
            }
        }

        pairs
    }

    fn score_affiliation(&self, pred: &AuthorRecord, gold: &GoldAuthor, tally: &mut Tally) {
        let pred_has = !pred.raw_affiliation.trim().is_empty();
        let gold_has = !gold.raw_affiliation.trim().is_empty();

        match (pred_has, gold_has) {
            (true, true) => {
                if fuzzy_eq(
                    &pred.raw_affiliation,
                    &gold.raw_affiliation,
                    self.config.author_match_threshold,
                ) {
                    tally.aff_tp += 1;
                } else {
                    tally.aff_fp += 1;
                }
            }
            // affiliation invented out of thin air
            (true, false) => tally.aff_fp += 1,
            (false, true) => tally.aff_fn += 1,
            (false, false) => {}
        }
    }

    fn score_normalization(&self, pred: &AuthorRecord, gold: &GoldAuthor, tally: &mut Tally) {
        let pred_norm = pred.normalized_affiliation.as_deref().unwrap_or("");

        let org_match = fuzzy_eq(
            pred_norm,
            &gold.normalized_affiliation,
            self.config.author_match_threshold,
        );
        if org_match {
            tally.org_correct += 1;
        }

        let country_match = exact_eq(pred.country.as_deref().unwrap_or(""), &gold.country)
            || exact_eq(pred.country_code.as_deref().unwrap_or(""), &gold.country_code);
        if country_match {
            tally.country_correct += 1;
        }

        if gold.org_type != OrgType::Unknown && pred.org_type == gold.org_type {
            tally.org_type_correct += 1;
        }

        if org_match && country_match {
            tally.hierarchical_correct += 1;
        }
    }

    fn finish(&self, tally: Tally, total_pred: usize) -> ExtractionMetrics {
        let author_precision = ratio(tally.author_tp as f64, (tally.author_tp + tally.author_fp) as f64);
        let author_recall = ratio(tally.author_tp as f64, (tally.author_tp + tally.author_fn) as f64);
        let affiliation_precision = ratio(tally.aff_tp as f64, (tally.aff_tp + tally.aff_fp) as f64);
        let affiliation_recall = ratio(tally.aff_tp as f64, (tally.aff_tp + tally.aff_fn) as f64);
        let matched = tally.matched as f64;

        ExtractionMetrics {
            author_precision,
            author_recall,
            author_f1: f1(author_precision, author_recall),
            affiliation_precision,
            affiliation_recall,
            affiliation_f1: f1(affiliation_precision, affiliation_recall),
            normalization_accuracy: ratio(tally.org_correct as f64, matched),
            country_accuracy: ratio(tally.country_correct as f64, matched),
            org_type_accuracy: ratio(tally.org_type_correct as f64, matched),
            hierarchical_accuracy: ratio(tally.hierarchical_correct as f64, matched),
            author_hallucination_rate: ratio(tally.author_fp as f64, total_pred as f64),
            affiliation_hallucination_rate: ratio(
                tally.aff_fp as f64,
                (tally.aff_tp + tally.aff_fp) as f64,
            ),
            papers_evaluated: tally.papers_evaluated,
            papers_skipped: tally.papers_skipped,
            matched_authors: tally.author_tp,
            total_gold_authors: tally.gold_authors,
            total_pred_authors: total_pred,
        }
    }
}

/// Weighted blend: extraction 0.60, agent 0.25, engineering 0.15.
/// A dimension that was not supplied contributes 0.0.
fn composite_score(
    extraction: &ExtractionMetrics,
    agent: Option<&AgentMetrics>,
    engineering: Option<&EngineeringMetrics>,
) -> f64 {
    let extraction_score = if extraction.author_f1 > 0.0 {
        extraction.author_f1 * 0.3
            + extraction.affiliation_f1 * 0.3
            + extraction.hierarchical_accuracy * 0.4
    } else {
        0.0
    };

    let agent_score = agent.map(|a| a.e2e_success_rate).unwrap_or(0.0);

    let time_score = engineering
        .map(|e| {
            if e.avg_time_per_paper > 0.0 {
                (BASELINE_SECONDS_PER_PAPER / e.avg_time_per_paper).min(1.0)
            } else {
                0.0
            }
        })
        .unwrap_or(0.0);

    extraction_score * 0.60 + agent_score * 0.25 + time_score * 0.15
}

/// Case- and whitespace-insensitive equality; empty strings never match.
fn exact_eq(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    !a.is_empty() && !b.is_empty() && a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_eq_ignores_case_and_space() {
        assert!(exact_eq("  canada ", "Canada"));
        assert!(!exact_eq("", ""));
        assert!(!exact_eq("US", "CA"));
    }

    #[test]
    fn test_composite_score_missing_dimensions_contribute_zero() {
        let extraction = ExtractionMetrics {
            author_f1: 1.0,
            affiliation_f1: 1.0,
            hierarchical_accuracy: 1.0,
            ..ExtractionMetrics::default()
        };
        let score = composite_score(&extraction, None, None);
        assert!((score - 0.60).abs() < 1e-12);
    }

    #[test]
    fn test_composite_score_gated_on_author_f1() {
        let extraction = ExtractionMetrics {
            author_f1: 0.0,
            affiliation_f1: 1.0,
            hierarchical_accuracy: 1.0,
            ..ExtractionMetrics::default()
        };
        let agent = AgentMetrics {
            e2e_success_rate: 1.0,
            ..AgentMetrics::default()
        };
        let score = composite_score(&extraction, Some(&agent), None);
        assert!((score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_time_score_capped_at_one() {
        let extraction = ExtractionMetrics::default();
        let engineering = EngineeringMetrics {
            total_time_seconds: 10.0,
            avg_time_per_paper: 1.0,
        };
        let score = composite_score(&extraction, None, Some(&engineering));
        assert!((score - 0.15).abs() < 1e-12);
    }
}
