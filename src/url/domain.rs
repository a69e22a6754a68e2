use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use reconcrawl::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs share scheme, host and port
///
/// `www.example.com` and `example.com` are different origins.
pub fn is_same_origin(url: &Url, base: &Url) -> bool {
    url.scheme().eq_ignore_ascii_case(base.scheme())
        && extract_domain(url) == extract_domain(base)
        && url.port_or_known_default() == base.port_or_known_default()
}
