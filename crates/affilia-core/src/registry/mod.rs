//! Canonical registry table and derived variant index

mod data;
mod index;

pub use data::builtin_records;
pub use index::VariantIndex;

use lazy_static::lazy_static;
use std::sync::Arc;

lazy_static! {
    static ref BUILTIN: Arc<VariantIndex> = Arc::new(VariantIndex::build(builtin_records()));
}

/// The built-in registry table, indexed once per process.
pub fn builtin_index() -> Arc<VariantIndex> {
    BUILTIN.clone()
}
