//! Text normalization and fuzzy similarity scoring

mod normalize;
mod similarity;

pub use normalize::{index_key, token_key};
pub use similarity::{fuzzy_eq, token_sort_ratio};
