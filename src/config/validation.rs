use crate::config::types::{CrawlConfig, CrawlerConfig, FileConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates a configuration file
pub fn validate_file_config(config: &FileConfig) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates the parameters of a single crawl run
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_max_pages(config.max_pages)?;

    if config.timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than 0".to_string(),
        ));
    }

    if config.seed.trim().is_empty() {
        return Err(ConfigError::InvalidUrl("seed URL cannot be empty".to_string()));
    }

    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_max_pages(config.max_pages)?;
    validate_timeout_secs(config.timeout)?;
    validate_delay_secs(config.delay)?;
    Ok(())
}

fn validate_max_pages(max_pages: u32) -> Result<(), ConfigError> {
    if max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            max_pages
        )));
    }
    Ok(())
}

/// Validates a timeout given in seconds
pub fn validate_timeout_secs(timeout: f64) -> Result<(), ConfigError> {
    if !timeout.is_finite() || timeout <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout must be a positive number of seconds, got {}",
            timeout
        )));
    }
    Ok(())
}

/// Validates a politeness delay given in seconds
pub fn validate_delay_secs(delay: f64) -> Result<(), ConfigError> {
    if !delay.is_finite() || delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be zero or a positive number of seconds, got {}",
            delay
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    if let Some(contact_email) = &config.contact_email {
        validate_email(contact_email)?;
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
