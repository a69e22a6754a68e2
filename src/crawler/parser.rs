//! HTML parser for extracting links, text and contact findings
//!
//! This module handles parsing fetched pages to extract:
//! - Same-origin links to follow (from `<a>` tags)
//! - The visible text of the page
//! - Email and phone findings
//! - Page title

use crate::extract::extract;
use crate::findings::TrackingItem;
use crate::url::{is_same_origin, page_key};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Path suffixes of resources that are not pages
const ASSET_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".gz", ".jpg", ".jpeg",
    ".png", ".gif", ".svg", ".webp", ".ico", ".css", ".js", ".xml", ".rss", ".mp3", ".mp4",
];

/// Everything the crawler needs from one fetched page
///
/// The parsed document is dropped before this is returned, so the value can
/// be held across await points.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from `<title>`)
    pub title: Option<String>,

    /// Findings on the page, deduplicated, each sourced to the page URL
    pub findings: Vec<TrackingItem>,

    /// Same-origin links found on the page, fragments stripped
    pub links: Vec<Url>,
}

/// Parses a fetched page and extracts findings and same-origin links
///
/// # Arguments
///
/// * `body` - The page body
/// * `page_url` - The URL the body was served from (after redirects)
/// * `is_html` - Whether the body is markup; plain text is scanned as-is
///
/// # Example
///
/// ```
/// use reconcrawl::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body>
///     <a href="/contact">Contact</a> hello@example.com</body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &base_url, true);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links.len(), 1);
/// assert_eq!(parsed.findings.len(), 1);
/// ```
pub fn parse_page(body: &str, page_url: &Url, is_html: bool) -> ParsedPage {
    if !is_html {
        let document = Html::parse_document("");
        return ParsedPage {
            title: None,
            findings: extract(body, &document, page_url.as_str()),
            links: Vec::new(),
        };
    }

    let document = Html::parse_document(body);
    let text = visible_text(&document);

    ParsedPage {
        title: extract_title(&document),
        findings: extract(&text, &document, page_url.as_str()),
        links: discover_links(&document, page_url),
    }
}

/// Extracts the page title from the HTML document
pub fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the text a reader would see, one space between text nodes
pub fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(fragment);
    }

    text
}

/// Returns the same-origin page URLs referenced by the document's anchors
///
/// # Link Rules
///
/// **Resolved:** relative paths, absolute URLs, protocol-relative `//host/...`
///
/// **Excluded:**
/// - Fragment-only links (same page anchors)
/// - `javascript:`, `mailto:`, `tel:`, `data:` links
/// - Non-HTTP(S) URLs after resolution
/// - `<a href="..." download>`
/// - Links to another origin
///
/// Fragments are stripped, query strings kept, and URLs that share a page
/// key appear once, in document order.
pub fn discover_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_link(href, base_url) else {
            continue;
        };

        if !is_same_origin(&url, base_url) {
            continue;
        }

        if seen.insert(page_key(&url)) {
            links.push(url);
        }
    }

    links
}

/// Resolves a link href to an absolute URL without a fragment
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only hrefs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url)
}

/// Returns false for links to documents, media and other non-page assets
pub fn is_page_link(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    !ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
