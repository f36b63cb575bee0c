use crate::config::types::{CatalogConfig, Config, FetcherConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if !config.index_path.contains("{letter}") {
        return Err(ConfigError::Validation(format!(
            "index-path must contain a {{letter}} placeholder, got '{}'",
            config.index_path
        )));
    }

    if config.sections.is_empty() {
        return Err(ConfigError::Validation(
            "sections cannot be empty".to_string(),
        ));
    }

    if let Some(c) = config.sections.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(ConfigError::Validation(format!(
            "sections must contain only lowercase ASCII letters, found '{}'",
            c
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be between 0 and 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.roster_path.is_empty() {
        return Err(ConfigError::Validation(
            "roster-path cannot be empty".to_string(),
        ));
    }

    if config.detail_path.is_empty() {
        return Err(ConfigError::Validation(
            "detail-path cannot be empty".to_string(),
        ));
    }

    if config.roster_path == config.detail_path {
        return Err(ConfigError::Validation(format!(
            "roster-path and detail-path must differ, both are '{}'",
            config.roster_path
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_base_url() {
        let mut config = Config::default();
        config.catalog.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_missing_letter_placeholder() {
        let mut config = Config::default();
        config.catalog.index_path = "/players/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_sections_must_be_lowercase_letters() {
        let mut config = Config::default();
        config.catalog.sections = "abC".to_string();
        assert!(validate(&config).is_err());

        config.catalog.sections = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_delay_is_allowed() {
        let mut config = Config::default();
        config.fetcher.request_delay_ms = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_too_many_retries_rejected() {
        let mut config = Config::default();
        config.fetcher.max_retries = 11;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.fetcher.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_same_output_paths_rejected() {
        let mut config = Config::default();
        config.output.detail_path = config.output.roster_path.clone();
        assert!(validate(&config).is_err());
    }
}
