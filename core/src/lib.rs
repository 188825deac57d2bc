//! Static search-index builder.
//!
//! Turns a corpus of rendered posts and pages into two deterministic,
//! client-queryable JSON artifacts: document metadata and an inverted index
//! of weighted terms. The pipeline is a single batch transformation per
//! build: tokenize, accumulate weighted term frequencies, drop corpus-wide
//! stop words by document frequency, length-normalize and truncate each
//! document's term list, invert, serialize. Rebuilding over unchanged input
//! produces byte-identical output.

pub mod assets;
pub mod config;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod index;
pub mod persist;
pub mod scorer;
pub mod tokenizer;

pub use config::SearchConfig;
pub use corpus::{DocId, Document, Page, Post};
pub use error::ConfigError;
pub use index::{FinalTermList, InvertedIndex};
pub use persist::IndexPaths;

/// Everything one build produces before serialization.
pub struct SearchIndex {
    pub documents: Vec<Document>,
    /// Per-document final term lists, indexed by document id.
    pub term_lists: Vec<FinalTermList>,
    pub terms: InvertedIndex,
}

/// Run the full pipeline over the given content.
///
/// Fails fast on configuration violations, before any document is touched.
/// Tokenization and scoring are total: malformed or empty text degrades to
/// fewer tokens, never an error. All intermediate state is scoped to this
/// call.
pub fn build_index(
    posts: &[Post],
    pages: &[Page],
    include_drafts: bool,
    config: &SearchConfig,
) -> Result<SearchIndex, ConfigError> {
    config.validate()?;

    let documents = corpus::collect_documents(posts, pages, include_drafts);
    let raw = scorer::accumulate(&documents, config);
    let dropped = filter::drop_set(&raw.doc_frequency, documents.len(), config);

    let term_lists: Vec<FinalTermList> = documents
        .iter()
        .map(|doc| {
            index::final_term_list(
                &raw.token_weights[doc.id as usize],
                &dropped,
                raw.body_token_counts[doc.id as usize],
                config,
            )
        })
        .collect();
    let terms = index::invert(&term_lists);

    tracing::info!(
        doc_count = documents.len(),
        term_count = terms.len(),
        dropped_tokens = dropped.len(),
        "built search index"
    );

    Ok(SearchIndex { documents, term_lists, terms })
}
