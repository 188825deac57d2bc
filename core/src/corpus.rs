use lazy_static::lazy_static;
use regex::Regex;
use time::Date;

pub type DocId = u32;

const EXCERPT_LIMIT: usize = 200;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").expect("valid regex");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// A rendered blog post as handed over by content discovery.
#[derive(Debug, Clone)]
pub struct Post {
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub date: Option<Date>,
    pub draft: bool,
    pub summary: Option<String>,
    pub content_html: String,
}

/// A rendered static page as handed over by content discovery.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub url: String,
    pub content_html: String,
    /// Pages stay out of the index unless they opt in.
    pub in_search: bool,
}

/// An indexable document. Immutable once collected; `id` is stable for the
/// duration of one build.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub date: Option<Date>,
    pub excerpt: String,
    pub body_text: String,
}

/// Project posts and pages into an ordered document list.
///
/// Draft posts are skipped unless `include_drafts` is set; pages are skipped
/// unless opted in. Posts come first, each group sorted by url, and ids are
/// assigned sequentially from 0 so that unchanged content keeps its ids
/// across builds.
pub fn collect_documents(posts: &[Post], pages: &[Page], include_drafts: bool) -> Vec<Document> {
    let mut selected_posts: Vec<&Post> = posts
        .iter()
        .filter(|post| include_drafts || !post.draft)
        .collect();
    selected_posts.sort_by(|a, b| a.url.cmp(&b.url));

    let mut selected_pages: Vec<&Page> = pages.iter().filter(|page| page.in_search).collect();
    selected_pages.sort_by(|a, b| a.url.cmp(&b.url));

    let mut documents = Vec::with_capacity(selected_posts.len() + selected_pages.len());
    let mut next_id: DocId = 0;

    for post in selected_posts {
        let body_text = html_to_text(&post.content_html);
        let excerpt_source = match &post.summary {
            Some(summary) if !summary.trim().is_empty() => html_to_text(summary),
            _ => body_text.clone(),
        };
        documents.push(Document {
            id: next_id,
            title: post.title.clone(),
            url: post.url.clone(),
            tags: post.tags.clone(),
            date: post.date,
            excerpt: normalize_excerpt(&excerpt_source, EXCERPT_LIMIT),
            body_text,
        });
        next_id += 1;
    }

    for page in selected_pages {
        let body_text = html_to_text(&page.content_html);
        documents.push(Document {
            id: next_id,
            title: page.title.clone(),
            url: page.url.clone(),
            tags: Vec::new(),
            date: None,
            excerpt: normalize_excerpt(&body_text, EXCERPT_LIMIT),
            body_text,
        });
        next_id += 1;
    }

    documents
}

/// Strip HTML tags and collapse whitespace.
pub fn html_to_text(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    WHITESPACE_RE.replace_all(&without_tags, " ").trim().to_string()
}

fn normalize_excerpt(text: &str, limit: usize) -> String {
    let cleaned = WHITESPACE_RE.replace_all(text, " ").trim().to_string();
    if cleaned.chars().count() <= limit {
        return cleaned;
    }
    let mut trimmed: String = cleaned.chars().take(limit).collect();
    trimmed.truncate(trimmed.trim_end().len());
    if !trimmed.ends_with("...") {
        trimmed.push_str("...");
    }
    trimmed
}
