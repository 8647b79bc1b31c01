//! External registry clients

pub mod ror;
pub mod traits;

pub use ror::RorClient;
pub use traits::{RegistryCandidate, RegistryError, RegistryLookup};
