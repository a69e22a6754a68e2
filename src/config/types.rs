use serde::Deserialize;
use std::time::Duration;

/// Default page budget for recursive crawls
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Default politeness delay in seconds
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Links to account pages are skipped unless the configuration says otherwise
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
    &["logout", "admin", "login", "register", "signup", "signin"];

/// The default exclude patterns as owned strings
pub fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Contents of an optional TOML configuration file
///
/// Every section and key is optional; missing values fall back to the
/// built-in defaults and command-line flags override whatever is set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages to fetch, seed included
    pub max_pages: u32,

    /// Request timeout in seconds
    pub timeout: f64,

    /// Minimum time between two fetches in seconds
    pub delay: f64,

    /// Follow same-origin links instead of stopping at the final page
    pub recursive: bool,

    /// Log every page being searched
    pub verbose: bool,

    /// Substrings that exclude a discovered link from the frontier
    /// (case-insensitive); replaces the defaults when set
    pub exclude_patterns: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            timeout: DEFAULT_TIMEOUT_SECS,
            delay: DEFAULT_DELAY_SECS,
            recursive: false,
            verbose: false,
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Name/Version` or `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", base, url, email),
            (Some(url), None) => format!("{} (+{})", base, url),
            (None, Some(email)) => format!("{} ({})", base, email),
            (None, None) => base,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the markdown report to write after the crawl
    pub report_path: Option<String>,
}

/// Immutable parameters of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// URL the crawl starts from
    pub seed: String,

    /// Maximum number of pages to fetch, seed included
    pub max_pages: u32,

    /// Per-request timeout
    pub timeout: Duration,

    /// Minimum time between two fetches
    pub delay: Duration,

    /// Log every page being searched
    pub verbose: bool,

    /// Follow same-origin links instead of stopping at the final page
    pub recursive: bool,

    /// Substrings that exclude a discovered link from the frontier
    pub exclude_patterns: Vec<String>,

    /// User agent identification
    pub user_agent: UserAgentConfig,
}

impl CrawlConfig {
    /// Creates a configuration for `seed` with default limits
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            verbose: false,
            recursive: false,
            exclude_patterns: default_exclude_patterns(),
            user_agent: UserAgentConfig::default(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_user_agent(mut self, user_agent: UserAgentConfig) -> Self {
        self.user_agent = user_agent;
        self
    }
}
