//! affilia-core: affiliation resolution and evaluation
//!
//! This library resolves free-text organizational affiliation strings from
//! scientific papers to canonical identities, and measures resolution and
//! extraction quality against a hand-curated gold standard:
//! - Built-in canonical registry table with a derived variant index
//! - Resolution cascade: exact lookup, fuzzy matching, ROR registry,
//!   generative fallback
//! - ROR (Research Organization Registry) client with caching, rate limiting
//!   and retries
//! - Evaluation engine: fuzzy bipartite author matching, precision/recall/F1,
//!   hierarchical accuracy, hallucination rates, composite scoring
//! - Gold standard store (JSON on disk)
//!
//! Everything is synchronous; network calls block the caller. Components are
//! plain constructed values with no global mutable state. None of the types
//! here are safe for concurrent mutation without external synchronization.

pub mod config;
pub mod evaluation;
pub mod generative;
pub mod http;
pub mod registry;
pub mod resolver;
pub mod sources;
pub mod text;

pub use config::ResolverConfig;
pub use evaluation::{
    AgentMetrics, EngineeringMetrics, EvaluationEngine, EvaluationReport, ExtractionMetrics,
    GoldStandardStore, GoldStoreError,
};
pub use generative::{ChatCompletionResolver, GenerativeError, GenerativeGuess, GenerativeResolver};
pub use registry::{builtin_index, VariantIndex};
pub use resolver::{OrganizationResolver, ResolutionStats};
pub use sources::{RegistryCandidate, RegistryError, RegistryLookup, RorClient};

// Re-export domain types for convenience
pub use affilia_domain::{
    AuthorRecord, GoldAuthor, GoldPaper, OrgType, OrganizationRecord, PaperRecord,
    ResolutionResult, ResolutionSource,
};
