use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use sitesearch_core::persist::write_artifacts;
use sitesearch_core::{assets, build_index, IndexPaths, Page, Post, SearchConfig};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One record of the content-model dump produced by content discovery.
#[derive(Debug, Deserialize)]
struct InputDoc {
    title: String,
    url: String,
    /// Rendered HTML; tags are stripped before indexing.
    #[serde(default)]
    body: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    draft: bool,
    /// Static page rather than a post.
    #[serde(default)]
    page: bool,
    /// Pages only: opt into the search index.
    #[serde(default)]
    in_search: bool,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    search: SearchConfig,
}

#[derive(Parser)]
#[command(name = "sitesearch-indexer")]
#[command(about = "Build static search-index artifacts from a content dump", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the search artifacts from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Site output directory; artifacts land under the configured subpath
        #[arg(long)]
        output: String,
        /// JSON config file with a `search` section (defaults apply when omitted)
        #[arg(long)]
        config: Option<String>,
        /// Index draft posts as well
        #[arg(long, default_value_t = false)]
        include_drafts: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, config, include_drafts } => {
            build(&input, &output, config.as_deref(), include_drafts)
        }
    }
}

fn build(input: &str, output: &str, config_path: Option<&str>, include_drafts: bool) -> Result<()> {
    let config = load_config(config_path)?;
    if !config.enabled {
        tracing::info!("search is disabled; no artifacts written");
        return Ok(());
    }

    let (posts, pages) = read_corpus(Path::new(input))?;
    tracing::info!(posts = posts.len(), pages = pages.len(), "ingested content records");

    let index = build_index(&posts, &pages, include_drafts, &config)?;

    let paths = IndexPaths::new(Path::new(output).join(config.output_subpath()?));
    write_artifacts(&paths, &index.documents, &index.terms)?;
    assets::write_search_script(&paths)?;

    tracing::info!(output = %paths.root.display(), "search index build complete");
    Ok(())
}

fn load_config(config_path: Option<&str>) -> Result<SearchConfig> {
    let Some(path) = config_path else {
        return Ok(SearchConfig { enabled: true, ..SearchConfig::default() });
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config file {path}"))?;
    let file: ConfigFile =
        serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?;
    Ok(file.search)
}

fn read_corpus(input: &Path) -> Result<(Vec<Post>, Vec<Page>)> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else {
        files.push(input.to_path_buf());
    }
    files.sort();

    let mut posts = Vec::new();
    let mut pages = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut posts, &mut pages)?;
        } else {
            read_json(&file, &mut posts, &mut pages)?;
        }
    }
    Ok((posts, pages))
}

fn read_jsonl(file: &Path, posts: &mut Vec<Post>, pages: &mut Vec<Page>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for line in BufReader::new(f).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("parsing record in {}", file.display()))?;
        ingest(doc, posts, pages)?;
    }
    Ok(())
}

fn read_json(file: &Path, posts: &mut Vec<Post>, pages: &mut Vec<Page>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for value in arr {
                let doc: InputDoc = serde_json::from_value(value)
                    .with_context(|| format!("parsing record in {}", file.display()))?;
                ingest(doc, posts, pages)?;
            }
        }
        other => {
            let doc: InputDoc = serde_json::from_value(other)
                .with_context(|| format!("parsing record in {}", file.display()))?;
            ingest(doc, posts, pages)?;
        }
    }
    Ok(())
}

fn ingest(doc: InputDoc, posts: &mut Vec<Post>, pages: &mut Vec<Page>) -> Result<()> {
    if doc.page {
        pages.push(Page {
            title: doc.title,
            url: doc.url,
            content_html: doc.body,
            in_search: doc.in_search,
        });
    } else {
        let date = doc.date.as_deref().map(parse_date).transpose()?;
        posts.push(Post {
            title: doc.title,
            url: doc.url,
            tags: doc.tags,
            date,
            draft: doc.draft,
            summary: doc.summary,
            content_html: doc.body,
        });
    }
    Ok(())
}

/// Accept RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
fn parse_date(text: &str) -> Result<Date> {
    if let Ok(ts) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(ts.date());
    }
    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(text, &date_only).with_context(|| format!("unparseable date {text:?}"))
}
