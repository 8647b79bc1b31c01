//! Persistent store of manually annotated gold papers
//!
//! One JSON file on disk, loaded whole into memory and keyed by paper id.
//! Loading is lenient: a malformed author entry drops that author with a
//! warning, and an entry without a paper id drops the paper, so one bad
//! annotation never poisons the rest of the file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use affilia_domain::{GoldAuthor, GoldPaper};

#[derive(Debug, Error)]
pub enum GoldStoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid gold standard file: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize gold standard: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct GoldFile<'a> {
    version: &'static str,
    created: String,
    total_papers: usize,
    total_authors: usize,
    papers: Vec<&'a GoldPaper>,
}

#[derive(Debug, Deserialize)]
struct GoldFileIn {
    #[serde(default)]
    papers: Vec<LenientPaper>,
}

/// Paper with authors left as raw JSON so one bad author can be skipped
/// without rejecting its siblings.
#[derive(Debug, Deserialize)]
struct LenientPaper {
    #[serde(default)]
    paper_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<serde_json::Value>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    annotator: String,
    #[serde(default)]
    annotation_date: String,
    #[serde(default)]
    notes: String,
}

/// Per-store annotation counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoldStoreStats {
    pub total_papers: usize,
    pub total_authors: usize,
    pub authors_with_affiliation: usize,
    pub papers_by_source: HashMap<String, usize>,
}

pub struct GoldStandardStore {
    path: PathBuf,
    papers: HashMap<String, GoldPaper>,
}

impl GoldStandardStore {
    /// Open a store at `path`, loading any existing annotations. A missing
    /// file yields an empty store; it is created on first save.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GoldStoreError> {
        let path = path.as_ref().to_path_buf();
        let mut store = GoldStandardStore {
            path: path.clone(),
            papers: HashMap::new(),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "gold standard file absent, starting empty");
            return Ok(store);
        }

        let raw = fs::read_to_string(&path).map_err(|source| GoldStoreError::Read {
            path: path.clone(),
            source,
        })?;
        let file: GoldFileIn =
            serde_json::from_str(&raw).map_err(|source| GoldStoreError::Malformed {
                path: path.clone(),
                source,
            })?;

        for lenient in file.papers {
            if lenient.paper_id.is_empty() {
                tracing::warn!(title = %lenient.title, "skipping gold paper without an id");
                continue;
            }

            let mut authors = Vec::with_capacity(lenient.authors.len());
            for value in lenient.authors {
                match serde_json::from_value::<GoldAuthor>(value) {
                    Ok(author) => authors.push(author),
                    Err(err) => {
                        tracing::warn!(
                            paper_id = %lenient.paper_id,
                            error = %err,
                            "skipping malformed gold author"
                        );
                    }
                }
            }

            store.papers.insert(
                lenient.paper_id.clone(),
                GoldPaper {
                    paper_id: lenient.paper_id,
                    title: lenient.title,
                    authors,
                    source: lenient.source.unwrap_or_else(|| "manual".to_string()),
                    annotator: lenient.annotator,
                    annotation_date: lenient.annotation_date,
                    notes: lenient.notes,
                },
            );
        }

        tracing::debug!(
            path = %store.path.display(),
            papers = store.papers.len(),
            "loaded gold standard"
        );
        Ok(store)
    }

    /// Write the full store back to its file, pretty-printed.
    pub fn save(&self) -> Result<(), GoldStoreError> {
        let mut papers: Vec<&GoldPaper> = self.papers.values().collect();
        papers.sort_by(|a, b| a.paper_id.cmp(&b.paper_id));

        let file = GoldFile {
            version: "1.0",
            created: chrono::Utc::now().to_rfc3339(),
            total_papers: papers.len(),
            total_authors: papers.iter().map(|p| p.authors.len()).sum(),
            papers,
        };

        let body = serde_json::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| GoldStoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, body).map_err(|source| GoldStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Insert or replace a paper's annotation.
    pub fn add_paper(&mut self, paper: GoldPaper) {
        self.papers.insert(paper.paper_id.clone(), paper);
    }

    pub fn get_paper(&self, paper_id: &str) -> Option<&GoldPaper> {
        self.papers.get(paper_id)
    }

    pub fn papers(&self) -> impl Iterator<Item = &GoldPaper> {
        self.papers.values()
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn stats(&self) -> GoldStoreStats {
        let mut stats = GoldStoreStats::default();
        for paper in self.papers.values() {
            stats.total_papers += 1;
            stats.total_authors += paper.authors.len();
            stats.authors_with_affiliation += paper
                .authors
                .iter()
                .filter(|a| !a.raw_affiliation.trim().is_empty())
                .count();
            *stats.papers_by_source.entry(paper.source.clone()).or_insert(0) += 1;
        }
        stats
    }

    /// Empty annotation skeleton for a paper, ready to be filled in by hand.
    pub fn annotation_template(paper_id: &str, title: &str, author_names: &[&str]) -> GoldPaper {
        GoldPaper {
            paper_id: paper_id.to_string(),
            title: title.to_string(),
            authors: author_names
                .iter()
                .map(|name| GoldAuthor {
                    name: name.to_string(),
                    ..GoldAuthor::default()
                })
                .collect(),
            source: "manual".to_string(),
            annotator: String::new(),
            annotation_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            notes: String::new(),
        }
    }
}
