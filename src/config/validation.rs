use crate::config::types::{Config, FetchConfig, PaginationConfig, SourceConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_fetch_config(&config.fetch)?;
    validate_pagination_config(&config.pagination)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_domain_string(&config.domain)?;

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.list_marker.is_empty() || config.list_marker.contains('/') {
        return Err(ConfigError::Validation(format!(
            "list-marker must be a single non-empty path segment, got '{}'",
            config.list_marker
        )));
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be at most 10, got {}",
            config.max_retries
        )));
    }

    if config.max_retries > 0 && config.backoff_base_ms == 0 {
        return Err(ConfigError::Validation(
            "backoff-base-ms must be >= 1 when retries are enabled".to_string(),
        ));
    }

    if config.timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeouts must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

fn validate_pagination_config(config: &PaginationConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_consecutive_failures < 1 {
        return Err(ConfigError::Validation(format!(
            "max-consecutive-failures must be >= 1, got {}",
            config.max_consecutive_failures
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if !config.contact_url.is_empty() {
        Url::parse(&config.contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation("domain cannot be empty".to_string()));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' has a misplaced dot",
            domain
        )));
    }

    Ok(())
}
