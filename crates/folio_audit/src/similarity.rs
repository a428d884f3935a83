//! Word-set similarity.

use std::collections::HashSet;

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Jaccard overlap of the lower-cased, whitespace-separated word sets.
///
/// Returns `0.0` when either side has no words. Symmetric and insensitive
/// to word order and repetition.
///
/// # Examples
///
/// ```
/// use folio_audit::jaccard_similarity;
///
/// assert_eq!(jaccard_similarity("Alice walked home.", "alice WALKED home."), 1.0);
/// assert_eq!(jaccard_similarity("a b", "c d"), 0.0);
/// assert_eq!(jaccard_similarity("a b c", "a b d"), 0.5);
/// assert_eq!(jaccard_similarity("", "anything"), 0.0);
/// ```
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let words_a = word_set(a);
    let words_b = word_set(b);
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("the cat sat", "the dog sat down"),
            ("一 二 三", "三 四"),
            ("x", "x x x y"),
        ];
        for (a, b) in pairs {
            assert_eq!(jaccard_similarity(a, b), jaccard_similarity(b, a));
        }
    }

    #[test]
    fn test_frequency_and_order_insensitive() {
        assert_eq!(jaccard_similarity("a a a b", "b a"), 1.0);
    }

    #[test]
    fn test_whitespace_only_is_zero() {
        assert_eq!(jaccard_similarity("  \n\t", "  "), 0.0);
    }

    #[test]
    fn test_unspaced_text_is_one_token() {
        // Without whitespace the whole paragraph is a single word.
        assert_eq!(jaccard_similarity("主角走进了森林", "主角走进了森林"), 1.0);
        assert_eq!(jaccard_similarity("主角走进了森林", "主角走出了森林"), 0.0);
    }
}
