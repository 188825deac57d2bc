use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_OUTPUT_DIR: &str = "assets/search";

/// Search configuration, as handed over by the external config loader.
///
/// Defaults mirror the site-wide defaults; user-provided values deserialize
/// over them. [`SearchConfig::validate`] must pass before the pipeline runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub enabled: bool,
    pub output_dir: String,
    pub max_terms_per_doc: usize,
    pub min_token_len: usize,
    pub drop_df_ratio: f64,
    pub drop_df_min: usize,
    pub weight_body: f64,
    pub weight_title: f64,
    pub weight_tags: f64,
    pub normalize_by_doc_len: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            max_terms_per_doc: 300,
            min_token_len: 2,
            drop_df_ratio: 0.70,
            drop_df_min: 0,
            weight_body: 1.0,
            weight_title: 8.0,
            weight_tags: 6.0,
            normalize_by_doc_len: true,
        }
    }
}

impl SearchConfig {
    /// Check every invariant once, before any document is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("weight_title", self.weight_title),
            ("weight_tags", self.weight_tags),
            ("weight_body", self.weight_body),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidWeight { field, value });
            }
        }
        if self.max_terms_per_doc == 0 {
            return Err(ConfigError::ZeroMaxTerms);
        }
        if self.min_token_len == 0 {
            return Err(ConfigError::ZeroMinTokenLen);
        }
        if !self.drop_df_ratio.is_finite() || !(0.0..=1.0).contains(&self.drop_df_ratio) {
            return Err(ConfigError::RatioOutOfRange(self.drop_df_ratio));
        }
        self.output_subpath()?;
        Ok(())
    }

    /// The artifact directory, sanitized so it stays inside the site output
    /// directory. Backslashes are normalized, leading `./` and `/` stripped;
    /// `..` components are rejected.
    pub fn output_subpath(&self) -> Result<PathBuf, ConfigError> {
        let mut text = self.output_dir.trim().replace('\\', "/");
        while let Some(rest) = text.strip_prefix("./") {
            text = rest.to_string();
        }
        let text = text.trim_start_matches('/');
        let text = if text.is_empty() { DEFAULT_OUTPUT_DIR } else { text };

        if text.split('/').any(|part| part == "..") {
            return Err(ConfigError::InvalidOutputPath(self.output_dir.clone()));
        }
        Ok(PathBuf::from(text))
    }
}
