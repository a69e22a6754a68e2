//! Contact extraction from fetched pages
//!
//! Emails come from two sources, the visible page text and the targets of
//! `mailto:` anchors, and are unioned after lowercasing. Phone numbers come
//! from the page text only. Extraction never fails: a document with nothing
//! recognizable simply yields no findings.

pub mod email;
pub mod phone;

use crate::findings::TrackingItem;
use scraper::Html;
use std::collections::HashSet;

pub use email::{find_emails, is_email, mailto_emails, normalize_email};
pub use phone::{find_phones, normalize_phone};

/// Extracts the deduplicated findings of a single page
///
/// # Arguments
///
/// * `page_text` - Visible text of the page
/// * `document` - Parsed HTML of the page
/// * `source_url` - URL recorded as the provenance of every finding
///
/// # Returns
///
/// Emails first (text order, then any address only present in `mailto:`
/// links), followed by phone numbers in text order.
///
/// # Example
///
/// ```
/// use reconcrawl::extract::extract;
/// use scraper::Html;
///
/// let html = r#"<p>Call (555) 123-4567</p><a href="mailto:hi@example.com">Mail</a>"#;
/// let document = Html::parse_document(html);
/// let items = extract("Call (555) 123-4567", &document, "https://example.com/");
/// assert_eq!(items.len(), 2);
/// ```
pub fn extract(page_text: &str, document: &Html, source_url: &str) -> Vec<TrackingItem> {
    let mut seen_emails = HashSet::new();
    let emails = find_emails(page_text)
        .into_iter()
        .chain(mailto_emails(document))
        .filter(|email| seen_emails.insert(email.clone()))
        .map(|email| TrackingItem::email(email, source_url));

    let phones = find_phones(page_text)
        .into_iter()
        .map(|phone| TrackingItem::phone(phone, source_url));

    let items: Vec<TrackingItem> = emails.chain(phones).collect();
    tracing::trace!("Extracted {} findings from {}", items.len(), source_url);
    items
}
