//! Email address extraction
//!
//! # Grammar
//!
//! ```text
//! email  = local "@" domain "." tld
//! local  = 1*( ALPHA / DIGIT / "." / "_" / "%" / "+" / "-" )
//! domain = 1*( ALPHA / DIGIT / "." / "-" )
//! tld    = 2*ALPHA
//! ```
//!
//! Matching is case-insensitive and word-bounded. Values are trimmed and
//! lowercased.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Longest address accepted (RFC 5321 path limit)
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("valid email pattern")
});

static EMAIL_EXACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid email pattern")
});

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Normalizes an address for dedup: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Returns true when the whole input is a single address
pub fn is_email(candidate: &str) -> bool {
    candidate.len() <= MAX_EMAIL_LEN && EMAIL_EXACT_RE.is_match(candidate)
}

/// Finds every address in free text, normalized, first occurrence order
pub fn find_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|email| email.len() <= MAX_EMAIL_LEN)
        .map(normalize_email)
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

/// Extracts the recipients of a `mailto:` href
///
/// The scheme is matched case-insensitively, header fields after `?` are
/// dropped, percent-escapes are decoded, and comma-separated recipients are
/// each validated.
pub fn mailto_recipients(href: &str) -> Vec<String> {
    let href = href.trim();
    let Some(scheme) = href.get(..7) else {
        return Vec::new();
    };
    if !scheme.eq_ignore_ascii_case("mailto:") {
        return Vec::new();
    }

    let target = href[7..].split('?').next().unwrap_or_default();
    let decoded = urlencoding::decode(target)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| target.to_string());

    decoded
        .split(',')
        .map(str::trim)
        .filter(|candidate| is_email(candidate))
        .map(normalize_email)
        .collect()
}

/// Collects addresses from every `mailto:` anchor in the document
pub fn mailto_emails(document: &Html) -> Vec<String> {
    let mut seen = HashSet::new();
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .flat_map(mailto_recipients)
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
