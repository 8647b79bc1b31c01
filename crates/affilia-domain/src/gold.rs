//! Hand-annotated reference records used as ground truth

use crate::organization::OrgType;
use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "manual".to_string()
}

/// Reference annotation for one author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoldAuthor {
    pub name: String,
    #[serde(default)]
    pub raw_affiliation: String,
    #[serde(default)]
    pub normalized_affiliation: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub org_type: OrgType,
}

/// Reference annotation for one paper, with provenance metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldPaper {
    pub paper_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<GoldAuthor>,
    /// Where the annotation came from: manual, grobid, crossref
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub annotator: String,
    #[serde(default)]
    pub annotation_date: String,
    #[serde(default)]
    pub notes: String,
}
