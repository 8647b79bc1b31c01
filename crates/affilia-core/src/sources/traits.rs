//! Common types for registry clients

use affilia_domain::OrgType;
use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("invalid registry response: {0}")]
    Parse(String),
    #[error("registry returned status {0}")]
    Status(u16),
}

/// Best candidate an external registry produced for a query
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryCandidate {
    /// Stable identifier in the registry's own scheme
    pub id: String,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub org_type: OrgType,
    pub aliases: Vec<String>,
    /// Match quality in [0, 1]; 1.0 for direct fetches by identifier
    pub confidence: f64,
}

/// Seam between the resolver's registry tier and a concrete client.
pub trait RegistryLookup {
    fn lookup(&mut self, name: &str) -> Result<Option<RegistryCandidate>, RegistryError>;
}
