//! Token-sort similarity scoring

use strsim::normalized_levenshtein;

use super::normalize::token_key;

/// Word-order-insensitive similarity between two strings, on a 0–100 scale.
///
/// Both inputs are normalized to comparison keys, split into tokens, and the
/// tokens sorted before a normalized Levenshtein comparison. "Smith, John"
/// and "John Smith" therefore score 100. Returns 0 if either side normalizes
/// to nothing.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let key_a = sorted_tokens(a);
    let key_b = sorted_tokens(b);

    if key_a.is_empty() || key_b.is_empty() {
        return 0.0;
    }

    normalized_levenshtein(&key_a, &key_b) * 100.0
}

/// Whether two strings are fuzzy-equal at the given 0–100 threshold.
/// Empty strings never match anything.
pub fn fuzzy_eq(a: &str, b: &str, threshold: f64) -> bool {
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    token_sort_ratio(a, b) >= threshold
}

fn sorted_tokens(s: &str) -> String {
    let key = token_key(s);
    let mut tokens: Vec<&str> = key.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_100() {
        assert!((token_sort_ratio("Stanford University", "Stanford University") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_order_is_ignored() {
        assert!((token_sort_ratio("John Smith", "Smith, John") - 100.0).abs() < 1e-9);
        assert!((token_sort_ratio("University of Toronto", "Toronto University of") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_and_punctuation_are_ignored() {
        assert!((token_sort_ratio("MIT", "m.i.t.") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_typo_scores_high_but_below_100() {
        let score = token_sort_ratio("Univesity of Toronto", "University of Toronto");
        assert!(score >= 90.0, "typo should score high, got {}", score);
        assert!(score < 100.0);
    }

    #[test]
    fn test_unrelated_strings_score_low() {
        let score = token_sort_ratio("Stanford University", "Tencent AI Lab");
        assert!(score < 50.0, "unrelated strings scored {}", score);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(token_sort_ratio("", "Stanford"), 0.0);
        assert_eq!(token_sort_ratio("...", "Stanford"), 0.0);
        assert_eq!(token_sort_ratio("", ""), 0.0);
    }

    #[test]
    fn test_fuzzy_eq_threshold() {
        assert!(fuzzy_eq("Univesity of Toronto", "University of Toronto", 85.0));
        assert!(!fuzzy_eq("Stanford", "Harvard", 85.0));
        assert!(!fuzzy_eq("", "", 0.0));
    }
}
