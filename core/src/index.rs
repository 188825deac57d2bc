use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::SearchConfig;
use crate::corpus::DocId;

/// Decimal places kept when rounding scores. Fixed so that identical input
/// yields byte-identical artifacts across platforms.
const SCORE_DECIMALS: f64 = 1e6;

/// Ordered (token, score) pairs for one document, at most
/// `max_terms_per_doc` long.
pub type FinalTermList = Vec<(String, f64)>;

/// token -> postings, postings ordered by descending score then ascending
/// document id. `BTreeMap` keeps token order lexicographic for serialization.
pub type InvertedIndex = BTreeMap<String, Vec<(DocId, f64)>>;

fn round_score(score: f64) -> f64 {
    (score * SCORE_DECIMALS).round() / SCORE_DECIMALS
}

/// Produce one document's final term list from its filtered raw weights.
///
/// Scores are length-normalized when configured, rounded, then sorted by
/// descending score with ties broken by ascending token so the result never
/// depends on map iteration order. The list is truncated to
/// `max_terms_per_doc`.
pub fn final_term_list(
    token_weights: &HashMap<String, f64>,
    dropped: &HashSet<String>,
    body_token_count: usize,
    config: &SearchConfig,
) -> FinalTermList {
    let norm = (body_token_count.max(1) as f64).sqrt();

    let mut terms: FinalTermList = token_weights
        .iter()
        .filter(|(token, &weight)| weight > 0.0 && !dropped.contains(*token))
        .map(|(token, &weight)| {
            let score = if config.normalize_by_doc_len { weight / norm } else { weight };
            (token.clone(), round_score(score))
        })
        .collect();

    terms.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    terms.truncate(config.max_terms_per_doc);
    terms
}

/// Invert per-document term lists into the token -> postings structure.
///
/// Term lists are indexed by document id. Postings ordering is imposed here,
/// never inherited from accumulation order: descending score, then ascending
/// document id, so a naive consumer can take the first K postings per token.
pub fn invert(term_lists: &[FinalTermList]) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (doc_id, terms) in term_lists.iter().enumerate() {
        for (token, score) in terms {
            index
                .entry(token.clone())
                .or_default()
                .push((doc_id as DocId, *score));
        }
    }
    for postings in index.values_mut() {
        postings.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
    }
    index
}
