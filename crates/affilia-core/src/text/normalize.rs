//! Comparison-key normalization for organization and author names

use unicode_normalization::UnicodeNormalization;

/// Key for exact variant-index lookups: trimmed, lower-cased, whitespace
/// collapsed. Keeps punctuation and non-Latin scripts intact so spellings
/// like "M.I.T." or Cyrillic acronyms stay distinct.
pub fn index_key(s: &str) -> String {
    collapse_whitespace(&s.trim().to_lowercase())
}

/// Key for fuzzy comparison: Unicode-normalized with diacritics dropped,
/// lower-cased, punctuation stripped, whitespace collapsed.
pub fn token_key(s: &str) -> String {
    let stripped: String = s
        .nfkd()
        // Combining marks are neither alphabetic nor numeric, so diacritics
        // fold away while non-Latin letters survive.
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    collapse_whitespace(&stripped.to_lowercase())
}

fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result.trim().to_string()
}
