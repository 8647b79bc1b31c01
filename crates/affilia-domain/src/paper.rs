//! Predicted paper/author records produced by an extraction pipeline

use crate::organization::OrgType;
use serde::{Deserialize, Serialize};

fn default_confidence() -> f64 {
    1.0
}

/// One extracted author with their affiliation, as predicted upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    /// Affiliation text as written in the paper
    #[serde(default)]
    pub raw_affiliation: String,
    /// Canonical organization name after resolution
    #[serde(default)]
    pub normalized_affiliation: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub org_type: OrgType,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl AuthorRecord {
    pub fn new(name: impl Into<String>) -> Self {
        AuthorRecord {
            name: name.into(),
            raw_affiliation: String::new(),
            normalized_affiliation: None,
            country: None,
            country_code: None,
            org_type: OrgType::Unknown,
            confidence: 1.0,
        }
    }
}

/// Extraction output for one paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub paper_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
}

impl PaperRecord {
    pub fn new(paper_id: impl Into<String>, title: impl Into<String>) -> Self {
        PaperRecord {
            paper_id: paper_id.into(),
            title: title.into(),
            authors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_record_defaults() {
        let author: AuthorRecord = serde_json::from_str(r#"{"name": "Ada Lovelace"}"#).unwrap();
        assert_eq!(author.name, "Ada Lovelace");
        assert_eq!(author.raw_affiliation, "");
        assert_eq!(author.normalized_affiliation, None);
        assert_eq!(author.org_type, OrgType::Unknown);
        assert!((author.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paper_record_round_trip() {
        let mut paper = PaperRecord::new("2401.00001", "A Paper");
        paper.authors.push(AuthorRecord::new("Ada Lovelace"));
        let json = serde_json::to_string(&paper).unwrap();
        let back: PaperRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, paper);
    }
}
