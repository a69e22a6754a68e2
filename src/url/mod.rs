//! URL handling module for reconcrawl
//!
//! This module provides page-key normalization for visited-set dedup,
//! same-origin checks, and seed URL preparation.

mod domain;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, is_same_origin};
pub use normalize::{page_key, page_key_str, parse_http_url};

/// Prepends `https://` when the input has no scheme
///
/// Inputs that already name a scheme are returned trimmed, so that
/// `ftp://...` is later rejected rather than rewritten.
///
/// # Examples
///
/// ```
/// use reconcrawl::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com"), "https://example.com");
/// assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
/// ```
pub fn ensure_scheme(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Turns user input into a seed URL, defaulting the scheme to HTTPS
pub fn parse_seed(input: &str) -> Result<Url, UrlError> {
    parse_http_url(&ensure_scheme(input))
}
