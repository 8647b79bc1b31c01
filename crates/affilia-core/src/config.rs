//! Threshold configuration for resolution and evaluation
//!
//! All tunable scores and confidence ceilings live here so behavior can be
//! adjusted and tested in isolation instead of being scattered literals.

use serde::{Deserialize, Serialize};

/// Scoring thresholds and confidence ceilings for the resolution cascade
/// and the evaluation engine.
///
/// Similarity scores are on a 0–100 scale; confidences on 0–1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum token-sort similarity for the fuzzy tier to accept a variant
    pub fuzzy_threshold: f64,
    /// Minimum similarity for a ROR search candidate to be accepted
    pub registry_min_score: f64,
    /// Minimum similarity for two author names to count as the same person
    pub author_match_threshold: f64,
    /// Confidence assigned to exact/substring knowledge-base hits
    pub kb_confidence: f64,
    /// Fuzzy-tier confidence = (score / 100) * this weight
    pub fuzzy_confidence_weight: f64,
    /// Confidence assigned to generative-fallback results
    pub generative_confidence: f64,
    /// Confidence assigned when nothing resolves
    pub unresolved_confidence: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            fuzzy_threshold: 80.0,
            registry_min_score: 60.0,
            author_match_threshold: 85.0,
            kb_confidence: 0.95,
            fuzzy_confidence_weight: 0.90,
            generative_confidence: 0.70,
            unresolved_confidence: 0.30,
        }
    }
}
