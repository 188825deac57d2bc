use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::corpus::Document;
use crate::index::InvertedIndex;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Locations of the generated search artifacts under the site output
/// directory.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn docs(&self) -> PathBuf {
        self.root.join("search_docs.json")
    }

    pub fn terms(&self) -> PathBuf {
        self.root.join("search_terms.json")
    }

    pub fn script(&self) -> PathBuf {
        self.root.join("search.js")
    }
}

/// One entry of the document metadata artifact.
#[derive(Debug, Serialize)]
pub struct DocEntry {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Document metadata keyed by stringified id. `BTreeMap` fixes the key order
/// lexicographically, which the byte-identical-rebuild contract relies on.
pub fn docs_payload(documents: &[Document]) -> BTreeMap<String, DocEntry> {
    documents
        .iter()
        .map(|doc| {
            let date = doc
                .date
                .and_then(|d| d.format(&DATE_FORMAT).ok());
            (
                doc.id.to_string(),
                DocEntry {
                    title: doc.title.clone(),
                    url: doc.url.clone(),
                    excerpt: doc.excerpt.clone(),
                    tags: doc.tags.clone(),
                    date,
                },
            )
        })
        .collect()
}

/// Write both artifacts. Payloads are serialized fully before either file is
/// created, so a serialization failure leaves no partial output behind.
pub fn write_artifacts(
    paths: &IndexPaths,
    documents: &[Document],
    index: &InvertedIndex,
) -> Result<()> {
    let docs_bytes = serde_json::to_vec(&docs_payload(documents))
        .context("serializing document metadata")?;
    let terms_bytes = serde_json::to_vec(index).context("serializing inverted index")?;

    create_dir_all(&paths.root)
        .with_context(|| format!("creating {}", paths.root.display()))?;
    write_file(&paths.docs(), &docs_bytes)?;
    write_file(&paths.terms(), &terms_bytes)?;
    Ok(())
}

fn write_file(target: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        File::create(target).with_context(|| format!("creating {}", target.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("writing {}", target.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn doc(id: u32, title: &str, date: Option<time::Date>) -> Document {
        Document {
            id,
            title: title.into(),
            url: format!("/{title}/"),
            tags: vec!["tag".into()],
            date,
            excerpt: "excerpt".into(),
            body_text: String::new(),
        }
    }

    #[test]
    fn dates_serialize_as_iso_and_absent_dates_are_omitted() {
        let docs = vec![doc(0, "dated", Some(date!(2025 - 01 - 02))), doc(1, "undated", None)];
        let json = serde_json::to_value(docs_payload(&docs)).unwrap();
        assert_eq!(json["0"]["date"], "2025-01-02");
        assert!(json["1"].get("date").is_none());
        assert_eq!(json["1"]["title"], "undated");
    }

    #[test]
    fn artifacts_land_under_the_index_root() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::new(dir.path().join("assets/search"));
        let index = InvertedIndex::new();
        write_artifacts(&paths, &[], &index).unwrap();
        assert_eq!(std::fs::read_to_string(paths.docs()).unwrap(), "{}");
        assert_eq!(std::fs::read_to_string(paths.terms()).unwrap(), "{}");
    }
}
