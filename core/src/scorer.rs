use std::collections::HashMap;

use crate::config::SearchConfig;
use crate::corpus::Document;
use crate::tokenizer::tokenize;

/// Build-scoped accumulation produced by the first pass over the corpus.
///
/// `token_weights` and `body_token_counts` are indexed by document id (ids are
/// assigned densely from 0 by the collector). `doc_frequency` counts
/// documents, not occurrences: a token contributes at most 1 per document no
/// matter how often or how heavily weighted it appears there.
#[derive(Debug, Default)]
pub struct RawScores {
    pub token_weights: Vec<HashMap<String, f64>>,
    pub body_token_counts: Vec<usize>,
    pub doc_frequency: HashMap<String, u32>,
}

/// Pass 1: accumulate weighted term frequencies and document frequencies.
///
/// Title, tags (each tag tokenized as its own short text), and body are
/// tokenized independently; every token occurrence adds its field weight to
/// the document's running score. The body token count is recorded pre-filter
/// for later length normalization.
pub fn accumulate(documents: &[Document], config: &SearchConfig) -> RawScores {
    let mut scores = RawScores {
        token_weights: Vec::with_capacity(documents.len()),
        body_token_counts: Vec::with_capacity(documents.len()),
        doc_frequency: HashMap::new(),
    };

    for document in documents {
        let mut weights: HashMap<String, f64> = HashMap::new();

        let body_tokens = tokenize(&document.body_text, config.min_token_len);
        let body_token_count = body_tokens.len();
        for token in body_tokens {
            *weights.entry(token).or_insert(0.0) += config.weight_body;
        }

        for token in tokenize(&document.title, config.min_token_len) {
            *weights.entry(token).or_insert(0.0) += config.weight_title;
        }

        for tag in &document.tags {
            for token in tokenize(tag, config.min_token_len) {
                *weights.entry(token).or_insert(0.0) += config.weight_tags;
            }
        }

        // Weighting and rarity are kept separate: df counts the document once
        // per distinct token, independent of field weights.
        for token in weights.keys() {
            *scores.doc_frequency.entry(token.clone()).or_insert(0) += 1;
        }

        scores.token_weights.push(weights);
        scores.body_token_counts.push(body_token_count);
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn doc(id: u32, title: &str, tags: &[&str], body: &str) -> Document {
        Document {
            id,
            title: title.into(),
            url: format!("/doc-{id}/"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: None,
            excerpt: String::new(),
            body_text: body.into(),
        }
    }

    #[test]
    fn field_weights_accumulate_per_occurrence() {
        let config = SearchConfig { weight_title: 8.0, weight_tags: 6.0, weight_body: 1.0, ..SearchConfig::default() };
        let docs = vec![doc(0, "Python Tips", &["python"], "python tips for python developers")];
        let scores = accumulate(&docs, &config);

        let weights = &scores.token_weights[0];
        // body: 2 occurrences, title: 1, tag: 1.
        assert_eq!(weights["python"], 2.0 * 1.0 + 8.0 + 6.0);
        assert_eq!(weights["tips"], 1.0 + 8.0);
        assert_eq!(weights["developers"], 1.0);
        // "for" survives min_token_len = 2.
        assert_eq!(weights["for"], 1.0);
        assert_eq!(scores.body_token_counts[0], 5);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let config = SearchConfig::default();
        let docs = vec![
            doc(0, "", &[], "shared shared shared"),
            doc(1, "Shared", &["shared"], "other words"),
            doc(2, "", &[], "nothing related"),
        ];
        let scores = accumulate(&docs, &config);
        assert_eq!(scores.doc_frequency["shared"], 2);
        assert_eq!(scores.doc_frequency["other"], 1);
    }

    #[test]
    fn body_token_count_ignores_title_and_tags() {
        let config = SearchConfig::default();
        let docs = vec![doc(0, "Many Words In Title", &["tag"], "just two")];
        let scores = accumulate(&docs, &config);
        assert_eq!(scores.body_token_counts[0], 2);
    }
}
