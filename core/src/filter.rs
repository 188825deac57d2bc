use std::collections::{HashMap, HashSet};

use crate::config::SearchConfig;

/// Whether a token is removed corpus-wide.
///
/// Too common: `df > drop_df_ratio * doc_count` (stop-word behavior). Too
/// rare: `df <= drop_df_min`, only when `drop_df_min > 0`. An empty corpus
/// disables the filter entirely.
pub fn should_drop(df: u32, doc_count: usize, config: &SearchConfig) -> bool {
    if doc_count == 0 {
        return false;
    }
    if config.drop_df_min > 0 && df as usize <= config.drop_df_min {
        return true;
    }
    f64::from(df) > config.drop_df_ratio * doc_count as f64
}

/// Compute the corpus-wide drop set from the document-frequency map.
pub fn drop_set(
    doc_frequency: &HashMap<String, u32>,
    doc_count: usize,
    config: &SearchConfig,
) -> HashSet<String> {
    doc_frequency
        .iter()
        .filter(|(_, &df)| should_drop(df, doc_count, config))
        .map(|(token, _)| token.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ratio: f64, df_min: usize) -> SearchConfig {
        SearchConfig { drop_df_ratio: ratio, drop_df_min: df_min, ..SearchConfig::default() }
    }

    #[test]
    fn common_tokens_are_dropped_above_the_ratio() {
        let cfg = config(0.70, 0);
        // df/N = 1.0 > 0.70
        assert!(should_drop(3, 3, &cfg));
        // df/N ≈ 0.67, not above the threshold
        assert!(!should_drop(2, 3, &cfg));
    }

    #[test]
    fn ratio_comparison_is_strict() {
        let cfg = config(0.5, 0);
        // Exactly at the threshold stays.
        assert!(!should_drop(2, 4, &cfg));
        assert!(should_drop(3, 4, &cfg));
    }

    #[test]
    fn rare_tokens_are_dropped_only_when_enabled() {
        let disabled = config(0.9, 0);
        assert!(!should_drop(1, 10, &disabled));

        let enabled = config(0.9, 2);
        assert!(should_drop(1, 10, &enabled));
        assert!(should_drop(2, 10, &enabled));
        assert!(!should_drop(3, 10, &enabled));
    }

    #[test]
    fn empty_corpus_disables_the_filter() {
        let cfg = config(0.0, 5);
        assert!(!should_drop(0, 0, &cfg));
        assert!(!should_drop(7, 0, &cfg));
    }

    #[test]
    fn drop_set_collects_only_dropped_tokens() {
        let cfg = config(0.70, 0);
        let mut df = HashMap::new();
        df.insert("everywhere".to_string(), 3);
        df.insert("python".to_string(), 2);
        let dropped = drop_set(&df, 3, &cfg);
        assert!(dropped.contains("everywhere"));
        assert!(!dropped.contains("python"));
    }
}
