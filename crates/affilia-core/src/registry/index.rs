//! Exact and substring lookup over every known spelling

use std::collections::HashMap;

use affilia_domain::OrganizationRecord;

use crate::text::index_key;

/// Maps every lower-cased known spelling (canonical name, variants, aliases)
/// to its organization record.
///
/// Built once from the registry table; read-only afterwards.
pub struct VariantIndex {
    records: Vec<OrganizationRecord>,
    by_spelling: HashMap<String, usize>,
}

impl VariantIndex {
    pub fn build(records: Vec<OrganizationRecord>) -> Self {
        let mut by_spelling = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            for spelling in record.spellings() {
                let key = index_key(spelling);
                if !key.is_empty() {
                    // A spelling shared by two records keeps the later one;
                    // which record owns it is unspecified.
                    by_spelling.insert(key, idx);
                }
            }
        }

        VariantIndex {
            records,
            by_spelling,
        }
    }

    /// Case-insensitive, whitespace-trimmed lookup of a known spelling.
    ///
    /// Falls back to a substring-containment scan (the input contains a known
    /// spelling, or a known spelling contains the input) when there is no
    /// exact hit. The scan runs over an unordered map, so when several
    /// spellings would match, which record wins is unspecified.
    pub fn lookup_exact(&self, text: &str) -> Option<&OrganizationRecord> {
        let key = index_key(text);
        if key.is_empty() {
            return None;
        }

        if let Some(&idx) = self.by_spelling.get(&key) {
            return Some(&self.records[idx]);
        }

        for (spelling, &idx) in &self.by_spelling {
            if key.contains(spelling.as_str()) || spelling.contains(&key) {
                return Some(&self.records[idx]);
            }
        }

        None
    }

    pub fn records(&self) -> &[OrganizationRecord] {
        &self.records
    }

    /// Every indexed spelling with its record; input to the fuzzy tier.
    pub fn spellings(&self) -> impl Iterator<Item = (&str, &OrganizationRecord)> {
        self.by_spelling
            .iter()
            .map(move |(spelling, &idx)| (spelling.as_str(), &self.records[idx]))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
