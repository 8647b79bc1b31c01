//! Organization name resolution cascade
//!
//! `OrganizationResolver` is the primary entry point for normalization. It
//! runs an ordered list of strategies (exact/substring lookup, fuzzy
//! matching, external registry, generative fallback) and takes the first
//! success. Unresolved names degrade to a low-confidence pass-through; the
//! input text is never discarded.

use std::collections::HashMap;
use std::sync::Arc;

use affilia_domain::{OrganizationRecord, ResolutionResult, ResolutionSource};

use crate::config::ResolverConfig;
use crate::generative::GenerativeResolver;
use crate::registry::{builtin_index, VariantIndex};
use crate::sources::RegistryLookup;
use crate::text::{index_key, token_sort_ratio};

/// The cascade tiers, tried in order. First success wins.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    ExactLookup,
    FuzzyMatch,
    Registry,
    Generative,
}

const CASCADE: [Strategy; 4] = [
    Strategy::ExactLookup,
    Strategy::FuzzyMatch,
    Strategy::Registry,
    Strategy::Generative,
];

/// Aggregate view of what a resolver instance has resolved so far
#[derive(Debug, Clone, Default)]
pub struct ResolutionStats {
    pub total: usize,
    pub by_source: HashMap<ResolutionSource, usize>,
    pub mean_confidence: f64,
}

pub struct OrganizationResolver {
    index: Arc<VariantIndex>,
    config: ResolverConfig,
    registry: Option<Box<dyn RegistryLookup>>,
    generative: Option<Box<dyn GenerativeResolver>>,
    cache: HashMap<String, ResolutionResult>,
}

impl OrganizationResolver {
    /// Resolver over the built-in registry table, with no external tiers.
    pub fn new(config: ResolverConfig) -> Self {
        OrganizationResolver {
            index: builtin_index(),
            config,
            registry: None,
            generative: None,
            cache: HashMap::new(),
        }
    }

    /// Swap in a custom registry table.
    pub fn with_index(mut self, index: Arc<VariantIndex>) -> Self {
        self.index = index;
        self
    }

    /// Enable the external-registry tier.
    pub fn with_registry(mut self, registry: Box<dyn RegistryLookup>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Enable the generative-fallback tier.
    pub fn with_generative(mut self, generative: Box<dyn GenerativeResolver>) -> Self {
        self.generative = Some(generative);
        self
    }

    /// Resolve a raw affiliation string to a canonical identity.
    ///
    /// Never fails for normal input: empty/whitespace input and cascade
    /// misses both degrade to `source = none` with the input passed through.
    /// Results are cached by lower-cased trimmed input; repeated calls
    /// return the cached result without re-running the cascade.
    pub fn normalize(&mut self, raw: &str) -> ResolutionResult {
        if raw.trim().is_empty() {
            return ResolutionResult::unresolved(raw, self.config.unresolved_confidence);
        }

        let cache_key = index_key(raw);
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(input = raw, "resolution cache hit");
            return cached.clone();
        }

        let result = self.run_cascade(raw);
        self.cache.insert(cache_key, result.clone());
        result
    }

    pub fn normalize_batch<'a, I>(&mut self, raws: I) -> Vec<ResolutionResult>
    where
        I: IntoIterator<Item = &'a str>,
    {
        raws.into_iter().map(|raw| self.normalize(raw)).collect()
    }

    fn run_cascade(&mut self, raw: &str) -> ResolutionResult {
        for strategy in CASCADE {
            let result = match strategy {
                Strategy::ExactLookup => self.try_exact(raw),
                Strategy::FuzzyMatch => self.try_fuzzy(raw),
                Strategy::Registry => self.try_registry(raw),
                Strategy::Generative => self.try_generative(raw),
            };
            if let Some(result) = result {
                tracing::debug!(input = raw, source = %result.source, "resolved");
                return result;
            }
        }

        ResolutionResult::unresolved(raw, self.config.unresolved_confidence)
    }

    fn try_exact(&self, raw: &str) -> Option<ResolutionResult> {
        let record = self.index.lookup_exact(raw)?;
        Some(self.from_record(raw, record, self.config.kb_confidence, ResolutionSource::Kb))
    }

    /// Best token-sort score across every known spelling; accepted at or
    /// above the fuzzy threshold. Ties keep the first-seen spelling, which
    /// over an unordered index is unspecified.
    fn try_fuzzy(&self, raw: &str) -> Option<ResolutionResult> {
        let mut best: Option<(f64, &OrganizationRecord)> = None;

        for (spelling, record) in self.index.spellings() {
            let score = token_sort_ratio(raw, spelling);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, record));
            }
        }

        let (score, record) = best?;
        if score < self.config.fuzzy_threshold {
            return None;
        }

        let confidence = score / 100.0 * self.config.fuzzy_confidence_weight;
        Some(self.from_record(raw, record, confidence, ResolutionSource::Fuzzy))
    }

    fn try_registry(&mut self, raw: &str) -> Option<ResolutionResult> {
        let registry = self.registry.as_mut()?;

        match registry.lookup(raw) {
            Ok(Some(candidate)) => Some(ResolutionResult {
                original_text: raw.to_string(),
                normalized_name: candidate.name,
                country: candidate.country,
                country_code: candidate.country_code,
                org_type: candidate.org_type,
                confidence: candidate.confidence,
                source: ResolutionSource::Registry,
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(input = raw, error = %err, "registry lookup failed");
                None
            }
        }
    }

    fn try_generative(&self, raw: &str) -> Option<ResolutionResult> {
        let generative = self.generative.as_ref()?;

        match generative.infer(raw) {
            Ok(Some(guess)) => Some(ResolutionResult {
                original_text: raw.to_string(),
                normalized_name: guess.canonical,
                country: guess.country,
                country_code: guess.country_code,
                org_type: guess.org_type,
                confidence: self.config.generative_confidence,
                source: ResolutionSource::Generative,
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(input = raw, error = %err, "generative fallback failed");
                None
            }
        }
    }

    fn from_record(
        &self,
        raw: &str,
        record: &OrganizationRecord,
        confidence: f64,
        source: ResolutionSource,
    ) -> ResolutionResult {
        ResolutionResult {
            original_text: raw.to_string(),
            normalized_name: record.canonical_name.clone(),
            country: record.country.clone(),
            country_code: record.country_code.clone(),
            org_type: record.org_type,
            confidence,
            source,
        }
    }

    /// Statistics over everything this instance has resolved and cached.
    pub fn stats(&self) -> ResolutionStats {
        let total = self.cache.len();
        let mut by_source: HashMap<ResolutionSource, usize> = HashMap::new();
        let mut confidence_sum = 0.0;

        for result in self.cache.values() {
            *by_source.entry(result.source).or_insert(0) += 1;
            confidence_sum += result.confidence;
        }

        ResolutionStats {
            total,
            by_source,
            mean_confidence: if total > 0 {
                confidence_sum / total as f64
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affilia_domain::OrgType;

    fn resolver() -> OrganizationResolver {
        OrganizationResolver::new(ResolverConfig::default())
    }

    #[test]
    fn test_exact_hit_uses_kb_confidence() {
        let mut resolver = resolver();
        let result = resolver.normalize("Stanford University");
        assert_eq!(result.source, ResolutionSource::Kb);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.normalized_name, "Stanford University");
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let mut resolver = resolver();
        let result = resolver.normalize("   ");
        assert_eq!(result.source, ResolutionSource::None);
        assert_eq!(result.confidence, 0.30);
        assert_eq!(result.normalized_name, "   ");
    }

    #[test]
    fn test_unresolved_passes_through() {
        let mut resolver = resolver();
        let result = resolver.normalize("Wiggleworth Zzyzx Bureau of Improbable Cheese");
        assert_eq!(result.source, ResolutionSource::None);
        assert_eq!(result.confidence, 0.30);
        assert_eq!(result.normalized_name, "Wiggleworth Zzyzx Bureau of Improbable Cheese");
        assert_eq!(result.org_type, OrgType::Unknown);
    }

    #[test]
    fn test_fuzzy_confidence_scales_with_score() {
        let mut resolver = resolver();
        let result = resolver.normalize("Univesity of Toronto");
        assert_eq!(result.source, ResolutionSource::Fuzzy);
        assert_eq!(result.normalized_name, "University of Toronto");

        let score = token_sort_ratio("Univesity of Toronto", "University of Toronto");
        let expected = score / 100.0 * 0.90;
        assert!((result.confidence - expected).abs() < 1e-9);
        assert!(result.confidence < 0.95);
    }

    #[test]
    fn test_normalize_batch() {
        let mut resolver = resolver();
        let results = resolver.normalize_batch(["MIT", "Stanford University"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].normalized_name, "Massachusetts Institute of Technology");
        assert_eq!(results[1].normalized_name, "Stanford University");
    }

    #[test]
    fn test_stats_counts_by_source() {
        let mut resolver = resolver();
        resolver.normalize("MIT");
        resolver.normalize("Stanford University");
        resolver.normalize("Wiggleworth Zzyzx Bureau of Improbable Cheese");

        let stats = resolver.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_source.get(&ResolutionSource::Kb), Some(&2));
        assert_eq!(stats.by_source.get(&ResolutionSource::None), Some(&1));
        assert!(stats.mean_confidence > 0.0 && stats.mean_confidence < 1.0);
    }
}
