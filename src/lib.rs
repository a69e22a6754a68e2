//! reconcrawl: contact reconnaissance for websites
//!
//! This crate fetches a seed page, follows its redirects to the canonical
//! final URL, optionally crawls same-origin links breadth-first, and extracts
//! email addresses and US phone numbers from every page it reads.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod findings;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for reconcrawl operations
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Redirect loop detected at {url}")]
    RedirectLoop { url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Crawl cancelled")]
    Cancelled,

    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

impl ReconError {
    /// Short, stable name of the error kind, used in CLI messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::Http { .. } => "http",
            Self::RedirectLoop { .. } => "redirect-loop",
            Self::InvalidUrl(_) => "invalid-url",
            Self::Cancelled => "cancelled",
            Self::Client(_) => "client",
            Self::InvalidTransition { .. } => "state",
        }
    }

    /// The URL the error is about, when there is one
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::Http { url, .. }
            | Self::RedirectLoop { url } => Some(url),
            _ => None,
        }
    }

    /// HTTP status code for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {message}")]
    Parse { url: String, message: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for reconcrawl operations
pub type Result<T> = std::result::Result<T, ReconError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, crawl_all, Coordinator};
pub use findings::{ItemKind, ResultStore, TrackingItem};
pub use output::{CrawlReport, CrawlStatus};
pub use state::CrawlPhase;
