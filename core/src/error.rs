use thiserror::Error;

/// Configuration violations abort the build before any document is processed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("search weight `{field}` must be a positive finite number, got {value}")]
    InvalidWeight { field: &'static str, value: f64 },

    #[error("max_terms_per_doc must be at least 1")]
    ZeroMaxTerms,

    #[error("min_token_len must be at least 1")]
    ZeroMinTokenLen,

    #[error("drop_df_ratio must be within [0, 1], got {0}")]
    RatioOutOfRange(f64),

    #[error("search output path must stay relative to the output directory: {0}")]
    InvalidOutputPath(String),
}
