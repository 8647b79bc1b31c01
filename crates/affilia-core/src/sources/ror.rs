//! ROR (Research Organization Registry) client
//!
//! API docs: https://ror.readme.io/docs/rest-api
//! Free, no API key; moderated data. No hard rate limit, but keep well
//! under the recommended 50 requests/second.

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;

use affilia_domain::OrgType;

use super::traits::{RegistryCandidate, RegistryError, RegistryLookup};
use crate::config::ResolverConfig;
use crate::http::{HttpClient, RetryPolicy};
use crate::text::token_sort_ratio;

const BASE_URL: &str = "https://api.ror.org/v2";

/// Only this many of the registry's ranked results are scored.
const SEARCH_CANDIDATE_LIMIT: usize = 5;

/// Known acronyms expanded before searching; ROR's own search handles full
/// names far better than bare abbreviations.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mit", "Massachusetts Institute of Technology"),
    ("caltech", "California Institute of Technology"),
    ("cmu", "Carnegie Mellon University"),
    ("eth", "ETH Zurich"),
    ("eth zurich", "ETH Zurich"),
    ("ucl", "University College London"),
    ("ucla", "University of California, Los Angeles"),
    ("ucb", "University of California, Berkeley"),
    ("uc berkeley", "University of California, Berkeley"),
    ("usc", "University of Southern California"),
    ("nyu", "New York University"),
    ("columbia", "Columbia University"),
    ("princeton", "Princeton University"),
    ("yale", "Yale University"),
    ("penn", "University of Pennsylvania"),
    ("upenn", "University of Pennsylvania"),
    ("gatech", "Georgia Institute of Technology"),
    ("georgia tech", "Georgia Institute of Technology"),
    ("uiuc", "University of Illinois Urbana-Champaign"),
    ("umich", "University of Michigan"),
    ("uw", "University of Washington"),
    ("ut austin", "University of Texas at Austin"),
    ("utexas", "University of Texas at Austin"),
    ("google research", "Google LLC"),
    ("google deepmind", "Google DeepMind"),
    ("deepmind", "Google DeepMind"),
    ("meta ai", "Meta Platforms"),
    ("facebook ai", "Meta Platforms"),
    ("fair", "Meta Platforms"),
    ("microsoft research", "Microsoft"),
    ("msr", "Microsoft"),
    ("openai", "OpenAI"),
    ("amazon research", "Amazon.com"),
    ("apple ml", "Apple Inc."),
    ("ibm research", "IBM"),
    ("nvidia research", "NVIDIA"),
    ("inria", "Institut national de recherche en sciences et technologies du numérique"),
    ("cnrs", "Centre National de la Recherche Scientifique"),
    ("max planck", "Max Planck Society"),
    ("mpi", "Max Planck Society"),
    ("csiro", "Commonwealth Scientific and Industrial Research Organisation"),
    ("nist", "National Institute of Standards and Technology"),
    ("nasa", "National Aeronautics and Space Administration"),
    ("nih", "National Institutes of Health"),
    ("epfl", "École Polytechnique Fédérale de Lausanne"),
    ("kaist", "Korea Advanced Institute of Science and Technology"),
    ("postech", "Pohang University of Science and Technology"),
    ("nus", "National University of Singapore"),
    ("ntu", "Nanyang Technological University"),
    ("hku", "University of Hong Kong"),
    ("cuhk", "Chinese University of Hong Kong"),
    ("pku", "Peking University"),
    ("thu", "Tsinghua University"),
    ("sjtu", "Shanghai Jiao Tong University"),
    ("zju", "Zhejiang University"),
    ("ustc", "University of Science and Technology of China"),
    ("anu", "Australian National University"),
    ("uoft", "University of Toronto"),
    ("mcgill", "McGill University"),
    ("ubc", "University of British Columbia"),
    ("cam", "University of Cambridge"),
    ("ox", "University of Oxford"),
    ("oxford", "University of Oxford"),
    ("cambridge", "University of Cambridge"),
    ("imperial", "Imperial College London"),
    ("ic", "Imperial College London"),
    ("lmu", "Ludwig-Maximilians-Universität München"),
    ("tu munich", "Technische Universität München"),
    ("tum", "Technische Universität München"),
];

// ===== ROR API v2 response shapes =====

#[derive(Debug, Deserialize)]
struct RorSearchResponse {
    #[serde(default)]
    items: Vec<RorOrganization>,
}

#[derive(Debug, Deserialize)]
struct RorOrganization {
    id: String,
    #[serde(default)]
    names: Vec<RorName>,
    #[serde(default)]
    locations: Vec<RorLocation>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RorName {
    #[serde(default)]
    value: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RorLocation {
    geonames_details: Option<RorGeonames>,
}

#[derive(Debug, Deserialize)]
struct RorGeonames {
    country_name: Option<String>,
    country_code: Option<String>,
}

fn map_ror_type(tag: &str) -> OrgType {
    match tag.to_lowercase().as_str() {
        "education" => OrgType::University,
        "company" => OrgType::Company,
        "government" => OrgType::Government,
        "nonprofit" => OrgType::Nonprofit,
        "healthcare" => OrgType::Hospital,
        "facility" | "archive" => OrgType::ResearchInstitute,
        _ => OrgType::Unknown,
    }
}

/// Client for the ROR registry with a bounded result cache, per-instance
/// rate limiting and retried requests.
pub struct RorClient {
    client: HttpClient,
    base_url: String,
    retry: RetryPolicy,
    min_score: f64,
    cache: HashMap<String, Option<RegistryCandidate>>,
    cache_capacity: usize,
    min_request_interval: Duration,
    last_request: Option<Instant>,
    request_count: u64,
}

impl RorClient {
    pub fn new() -> Self {
        Self::from_config(&ResolverConfig::default())
    }

    /// Client with its acceptance threshold taken from the shared config.
    pub fn from_config(config: &ResolverConfig) -> Self {
        RorClient {
            client: HttpClient::new("affilia/0.1 (https://github.com/affilia-rs/affilia)"),
            base_url: BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            min_score: config.registry_min_score,
            cache: HashMap::new(),
            cache_capacity: 1000,
            // ~20 requests/second max
            min_request_interval: Duration::from_millis(50),
            last_request: None,
            request_count: 0,
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }

    /// Search the registry and return the best candidate, if any scores at
    /// least the minimum.
    ///
    /// Known abbreviations are expanded before searching; results are cached
    /// under the original query.
    pub fn lookup(&mut self, name: &str) -> Result<Option<RegistryCandidate>, RegistryError> {
        let cache_key = name.trim().to_lowercase();

        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached.clone());
        }

        let search_term = ABBREVIATIONS
            .iter()
            .find(|(abbr, _)| *abbr == cache_key)
            .map(|(_, full)| *full)
            .unwrap_or(name);

        let result = self.search(search_term)?;
        self.cache_insert(cache_key, result.clone());
        Ok(result)
    }

    /// Fetch an organization directly by ROR identifier (full URL or bare id).
    /// Returns `Ok(None)` when the registry has no such record.
    pub fn get_by_id(&mut self, ror_id: &str) -> Result<Option<RegistryCandidate>, RegistryError> {
        let bare_id = ror_id
            .strip_prefix("https://ror.org/")
            .unwrap_or(ror_id)
            .trim();

        let url = format!("{}/organizations/{}", self.base_url, bare_id);
        let response = self.request(|client, retry| retry.run(|| client.get(&url)))?;

        match response.status {
            404 => Ok(None),
            200 => {
                let org: RorOrganization = serde_json::from_str(&response.body)
                    .map_err(|e| RegistryError::Parse(format!("invalid ROR record: {}", e)))?;
                Ok(convert_organization(org, 1.0))
            }
            status => Err(RegistryError::Status(status)),
        }
    }

    fn search(&mut self, query: &str) -> Result<Option<RegistryCandidate>, RegistryError> {
        let url = format!("{}/organizations", self.base_url);
        let response =
            self.request(|client, retry| retry.run(|| client.get_with_params(&url, &[("query", query)])))?;

        if response.status != 200 {
            return Err(RegistryError::Status(response.status));
        }

        select_candidate(&response.body, query, self.min_score)
    }

    fn request<F>(&mut self, op: F) -> Result<crate::http::HttpResponse, RegistryError>
    where
        F: FnOnce(&HttpClient, &RetryPolicy) -> Result<crate::http::HttpResponse, crate::http::HttpError>,
    {
        self.throttle();
        self.request_count += 1;
        op(&self.client, &self.retry).map_err(RegistryError::from)
    }

    /// Enforce the minimum inter-request interval for this instance.
    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_request_interval {
                thread::sleep(self.min_request_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// Bounded insert. At capacity, one arbitrary entry is dropped to make
    /// room; this is deliberately not LRU.
    fn cache_insert(&mut self, key: String, value: Option<RegistryCandidate>) {
        if self.cache.len() >= self.cache_capacity && !self.cache.contains_key(&key) {
            if let Some(evict) = self.cache.keys().next().cloned() {
                self.cache.remove(&evict);
            }
        }
        self.cache.insert(key, value);
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for RorClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryLookup for RorClient {
    fn lookup(&mut self, name: &str) -> Result<Option<RegistryCandidate>, RegistryError> {
        RorClient::lookup(self, name)
    }
}

/// Pick the best-matching candidate from a ROR search response.
///
/// Scores each of the top results by the best token-sort similarity across
/// all of that record's names; ties keep the earlier-scanned candidate, so
/// the registry's own ranking is the effective tie-break.
pub fn select_candidate(
    json: &str,
    query: &str,
    min_score: f64,
) -> Result<Option<RegistryCandidate>, RegistryError> {
    let response: RorSearchResponse = serde_json::from_str(json)
        .map_err(|e| RegistryError::Parse(format!("invalid ROR JSON: {}", e)))?;

    let mut best: Option<(f64, RorOrganization)> = None;

    for org in response.items.into_iter().take(SEARCH_CANDIDATE_LIMIT) {
        let score = org
            .names
            .iter()
            .filter(|n| !n.value.is_empty())
            .map(|n| token_sort_ratio(query, &n.value))
            .fold(0.0_f64, f64::max);

        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, org));
        }
    }

    match best {
        Some((score, org)) if score >= min_score => Ok(convert_organization(org, score / 100.0)),
        _ => Ok(None),
    }
}

/// Flatten a ROR record into a candidate. Records without a display name
/// are dropped.
fn convert_organization(org: RorOrganization, confidence: f64) -> Option<RegistryCandidate> {
    let mut canonical = String::new();
    let mut aliases = Vec::new();

    for name in &org.names {
        if name.value.is_empty() {
            continue;
        }
        if name.types.iter().any(|t| t == "ror_display") {
            canonical = name.value.clone();
        } else if name.types.iter().any(|t| t == "alias" || t == "acronym") {
            aliases.push(name.value.clone());
        }
    }

    if canonical.is_empty() {
        return None;
    }

    let (country, country_code) = org
        .locations
        .first()
        .and_then(|loc| loc.geonames_details.as_ref())
        .map(|geo| {
            (
                geo.country_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                geo.country_code.clone().unwrap_or_else(|| "XX".to_string()),
            )
        })
        .unwrap_or_else(|| ("Unknown".to_string(), "XX".to_string()));

    let org_type = org
        .types
        .iter()
        .map(|t| map_ror_type(t))
        .find(|t| *t != OrgType::Unknown)
        .unwrap_or(OrgType::Unknown);

    Some(RegistryCandidate {
        id: org.id,
        name: canonical,
        country,
        country_code,
        org_type,
        aliases,
        confidence,
    })
}
