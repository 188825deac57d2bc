use anyhow::{Context, Result};
use std::fs;

use crate::persist::IndexPaths;

/// Client-side query script. Shares the tokenizer rules with the builder:
/// lowercase, Unicode-alphanumeric runs, minimum token length.
pub const SEARCH_SCRIPT: &str = include_str!("assets/search.js");

/// Emit the static client script next to the JSON artifacts.
pub fn write_search_script(paths: &IndexPaths) -> Result<()> {
    fs::create_dir_all(&paths.root)
        .with_context(|| format!("creating {}", paths.root.display()))?;
    fs::write(paths.script(), SEARCH_SCRIPT)
        .with_context(|| format!("writing {}", paths.script().display()))?;
    Ok(())
}
