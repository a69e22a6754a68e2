//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Manual redirect handling with loop detection
//! - Error classification

use crate::config::CrawlConfig;
use crate::ReconError;
use reqwest::{header, redirect::Policy, Client, Response, StatusCode};
use std::collections::HashSet;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Maximum number of redirect hops followed for one fetch
pub const MAX_REDIRECTS: usize = 10;

/// Upper bound for establishing a connection, independent of the request deadline
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code of the final response
    pub status_code: u16,

    /// Content-Type header value (empty when absent)
    pub content_type: String,

    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Returns true if the body should be parsed as markup
    pub fn is_html(&self) -> bool {
        let content_type = self.content_type.to_ascii_lowercase();
        content_type.is_empty() || content_type.contains("html") || content_type.contains("xml")
    }

    /// Returns true if the body is worth scanning for findings
    pub fn is_text(&self) -> bool {
        self.is_html() || self.content_type.to_ascii_lowercase().starts_with("text/")
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The run configuration (user agent and timeout are used)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ReconError::Client)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use reconcrawl::config::CrawlConfig;
/// use reconcrawl::crawler::build_http_client;
///
/// let config = CrawlConfig::new("https://example.com");
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, ReconError> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = config.user_agent.header_value();

    Client::builder()
        .user_agent(user_agent)
        .timeout(config.timeout)
        .connect_timeout(config.timeout.min(CONNECT_TIMEOUT))
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(ReconError::Client)
}

/// Fetches a URL, following redirects, and reads its body
///
/// # Request Flow
///
/// 1. Send GET request
/// 2. Handle redirects manually (max 10 hops)
///    - Relative `Location` values resolve against the current hop
///    - Track visited URLs to detect loops
/// 3. Classify the final response
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Ok(FetchedPage) |
/// | 3xx without usable Location | Http |
/// | Other non-2xx | Http |
/// | Deadline exceeded | Timeout |
/// | Connection refused, DNS, TLS | Network |
/// | Redirect loop | RedirectLoop |
/// | Redirect chain > 10 | RedirectLoop |
/// | Token cancelled | Cancelled |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `cancel` - Aborts the request when cancelled
pub async fn fetch_url(
    client: &Client,
    url: &Url,
    cancel: &CancellationToken,
) -> Result<FetchedPage, ReconError> {
    let mut current = url.clone();
    let mut chain = HashSet::from([current.to_string()]);
    let mut hops = 0;

    loop {
        let response = send(client, &current, cancel).await?;
        let status = response.status();

        if status.is_redirection() {
            if let Some(next) = redirect_target(&response, &current) {
                if hops >= MAX_REDIRECTS || !chain.insert(next.to_string()) {
                    tracing::debug!("Redirect loop at {} after {} hops", next, hops);
                    return Err(ReconError::RedirectLoop {
                        url: next.to_string(),
                    });
                }

                tracing::debug!("Redirect {} {} -> {}", status.as_u16(), current, next);
                hops += 1;
                current = next;
                continue;
            }
        }

        if !status.is_success() {
            return Err(ReconError::Http {
                url: current.to_string(),
                status: status.as_u16(),
            });
        }

        return read_page(response, current, status, cancel).await;
    }
}

async fn send(
    client: &Client,
    url: &Url,
    cancel: &CancellationToken,
) -> Result<Response, ReconError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ReconError::Cancelled),
        result = client.get(url.clone()).send() => result.map_err(|e| classify(e, url)),
    }
}

async fn read_page(
    response: Response,
    final_url: Url,
    status: StatusCode,
    cancel: &CancellationToken,
) -> Result<FetchedPage, ReconError> {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ReconError::Cancelled),
        result = response.text() => result.map_err(|e| classify(e, &final_url))?,
    };

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// Resolves the `Location` header of a redirect against the current URL
///
/// Returns None when the header is missing, unreadable, or points outside HTTP(S).
fn redirect_target(response: &Response, current: &Url) -> Option<Url> {
    let location = response.headers().get(header::LOCATION)?.to_str().ok()?;
    let mut next = current.join(location.trim()).ok()?;
    if next.scheme() != "http" && next.scheme() != "https" {
        return None;
    }
    if next.fragment().is_none() {
        next.set_fragment(current.fragment());
    }
    Some(next)
}

fn classify(error: reqwest::Error, url: &Url) -> ReconError {
    if error.is_timeout() {
        ReconError::Timeout {
            url: url.to_string(),
        }
    } else {
        ReconError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
