use crate::UrlError;
use url::Url;

/// Parses an absolute HTTP(S) URL
///
/// # Arguments
///
/// * `url_str` - The URL string to parse
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The URL is malformed, not HTTP(S), or has no host
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse {
        url: url_str.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(url)
}

/// Computes the page key used to decide whether two URLs are the same page
///
/// # Normalization Steps
///
/// 1. Lowercase scheme and host, drop default ports (done by the parser)
/// 2. Remove the fragment
/// 3. Empty path becomes `/`
/// 4. Remove trailing slashes, except for the root path
/// 5. Keep the query string untouched; distinct queries are distinct pages
///
/// Path case is preserved.
///
/// # Examples
///
/// ```
/// use reconcrawl::url::page_key;
/// use url::Url;
///
/// let a = Url::parse("https://EXAMPLE.com/about/").unwrap();
/// let b = Url::parse("https://example.com/about#team").unwrap();
/// assert_eq!(page_key(&a), page_key(&b));
/// assert_eq!(page_key(&a), "https://example.com/about");
/// ```
pub fn page_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let path = url.path();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        url.set_path("/");
    } else if trimmed.len() != path.len() {
        let trimmed = trimmed.to_string();
        url.set_path(&trimmed);
    }

    url.to_string()
}

/// Convenience wrapper that parses a string before computing its page key
pub fn page_key_str(url_str: &str) -> Result<String, UrlError> {
    parse_http_url(url_str).map(|url| page_key(&url))
}
