//! Domain types shared between affilia components
//!
//! This crate provides the canonical data model for affiliation resolution:
//! - OrganizationRecord: a canonical organization identity with known spellings
//! - ResolutionResult: the outcome of resolving a raw affiliation string
//! - AuthorRecord, PaperRecord: predicted author/affiliation extractions
//! - GoldAuthor, GoldPaper: hand-annotated reference records

pub mod gold;
pub mod organization;
pub mod paper;

pub use gold::*;
pub use organization::*;
pub use paper::*;
