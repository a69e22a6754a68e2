//! Configuration module for reconcrawl
//!
//! Run parameters live in [`CrawlConfig`]. An optional TOML file supplies
//! defaults for them; command-line flags override the file.
//!
//! # Example
//!
//! ```no_run
//! use reconcrawl::config::load_config;
//! use std::path::Path;
//!
//! let file = load_config(Path::new("reconcrawl.toml")).unwrap();
//! let config = file.to_crawl_config("https://example.com").unwrap();
//! println!("Crawler will fetch at most {} pages", config.max_pages);
//! ```

mod parser;
mod types;
mod validation;

use crate::ConfigError;
use std::time::Duration;

// Re-export types
pub use types::{
    default_exclude_patterns, CrawlConfig, CrawlerConfig, FileConfig, OutputConfig,
    UserAgentConfig, DEFAULT_DELAY_SECS, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_MAX_PAGES,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_delay_secs, validate_timeout_secs};

/// Converts a validated timeout in seconds into a `Duration`
pub fn timeout_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    validate_timeout_secs(secs)?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ConfigError::Validation(format!("timeout out of range: {}", e)))
}

/// Converts a validated delay in seconds into a `Duration`
pub fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    validate_delay_secs(secs)?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ConfigError::Validation(format!("delay out of range: {}", e)))
}

impl FileConfig {
    /// Builds run parameters for `seed` from the file's values
    pub fn to_crawl_config(&self, seed: impl Into<String>) -> Result<CrawlConfig, ConfigError> {
        let config = CrawlConfig::new(seed)
            .with_max_pages(self.crawler.max_pages)
            .with_timeout(timeout_from_secs(self.crawler.timeout)?)
            .with_delay(delay_from_secs(self.crawler.delay)?)
            .with_recursive(self.crawler.recursive)
            .with_verbose(self.crawler.verbose)
            .with_exclude_patterns(self.crawler.exclude_patterns.clone())
            .with_user_agent(self.user_agent.clone());
        validate(&config)?;
        Ok(config)
    }
}
