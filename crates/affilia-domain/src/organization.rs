//! Organization identities and resolution results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgType {
    University,
    Company,
    ResearchInstitute,
    Government,
    Hospital,
    Nonprofit,
    #[default]
    Unknown,
}

impl OrgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgType::University => "university",
            OrgType::Company => "company",
            OrgType::ResearchInstitute => "research_institute",
            OrgType::Government => "government",
            OrgType::Hospital => "hospital",
            OrgType::Nonprofit => "nonprofit",
            OrgType::Unknown => "unknown",
        }
    }

    /// Parse a type tag, falling back to `Unknown` for anything unrecognized.
    ///
    /// Used where the tag comes from an untrusted producer (generative
    /// fallback output, external registries) and a bad value must degrade
    /// rather than fail.
    pub fn parse_lenient(s: &str) -> OrgType {
        match s.trim().to_lowercase().as_str() {
            "university" => OrgType::University,
            "company" => OrgType::Company,
            "research_institute" => OrgType::ResearchInstitute,
            "government" => OrgType::Government,
            "hospital" => OrgType::Hospital,
            "nonprofit" => OrgType::Nonprofit,
            _ => OrgType::Unknown,
        }
    }
}

impl fmt::Display for OrgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical organization identity with its known spellings
///
/// Immutable once the registry table is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub canonical_name: String,
    pub country: String,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
    pub org_type: OrgType,
    /// Alternate spellings seen in the wild
    pub variants: Vec<String>,
    /// Short names and acronyms
    pub aliases: Vec<String>,
}

impl OrganizationRecord {
    /// Every spelling this record answers to: canonical name, variants, aliases.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_name.as_str())
            .chain(self.variants.iter().map(String::as_str))
            .chain(self.aliases.iter().map(String::as_str))
    }
}

/// Which tier of the resolution cascade produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Kb,
    Fuzzy,
    Registry,
    Generative,
    None,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionSource::Kb => "kb",
            ResolutionSource::Fuzzy => "fuzzy",
            ResolutionSource::Registry => "registry",
            ResolutionSource::Generative => "generative",
            ResolutionSource::None => "none",
        };
        f.write_str(s)
    }
}

/// Outcome of resolving one raw affiliation string
///
/// Confidence ceilings by source: kb 0.95, fuzzy 0.90 (scaled from the match
/// score), registry carries the registry's own score, generative 0.70,
/// none 0.30.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub original_text: String,
    pub normalized_name: String,
    pub country: String,
    pub country_code: String,
    pub org_type: OrgType,
    pub confidence: f64,
    pub source: ResolutionSource,
}

impl ResolutionResult {
    /// The lossless fallback: the input is passed through unchanged.
    pub fn unresolved(raw: &str, confidence: f64) -> Self {
        ResolutionResult {
            original_text: raw.to_string(),
            normalized_name: raw.to_string(),
            country: "Unknown".to_string(),
            country_code: "XX".to_string(),
            org_type: OrgType::Unknown,
            confidence,
            source: ResolutionSource::None,
        }
    }
}
