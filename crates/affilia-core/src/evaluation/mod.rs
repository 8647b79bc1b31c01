//! Quality measurement against a hand-annotated gold standard

pub mod engine;
pub mod gold;
pub mod metrics;

pub use engine::EvaluationEngine;
pub use gold::{GoldStandardStore, GoldStoreError, GoldStoreStats};
pub use metrics::{AgentMetrics, EngineeringMetrics, EvaluationReport, ExtractionMetrics};
