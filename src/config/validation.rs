use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.allowed_content_types.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_content_types cannot be empty".to_string(),
        ));
    }

    for media_type in &config.allowed_content_types {
        validate_media_type(media_type)?;
    }

    Ok(())
}

/// Validates that an allow-list entry is a bare media type
fn validate_media_type(media_type: &str) -> Result<(), ConfigError> {
    if media_type.is_empty() {
        return Err(ConfigError::Validation(
            "allowed content type cannot be empty".to_string(),
        ));
    }

    // The gate compares against the part before ';', so parameters in the
    // allow-list would never match anything
    if media_type.contains(';') {
        return Err(ConfigError::Validation(format!(
            "allowed content type '{media_type}' must not carry parameters"
        )));
    }

    if media_type.contains(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "allowed content type '{media_type}' must not contain whitespace"
        )));
    }

    if !media_type.contains('/') {
        return Err(ConfigError::Validation(format!(
            "allowed content type '{media_type}' must be of the form type/subtype"
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

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    // Validate contact URL when present
    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {e}")))?;
    }

    Ok(())
}
