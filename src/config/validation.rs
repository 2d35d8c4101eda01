use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::url::SiteRoot;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    SiteRoot::from_seed(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if !config.request_delay.is_finite() || config.request_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "request-delay must be a non-negative number of seconds, got {}",
            config.request_delay
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let template = config.file_template.trim();

    // An empty template selects console output
    if template.is_empty() {
        return Ok(());
    }

    if template.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "file-template must name a file, got '{}'",
            template
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
    fn test_validate_seed_url() {
        let mut config = CrawlerConfig::default();

        config.seed_url = "https://example.com/start".to_string();
        assert!(validate_crawler_config(&config).is_ok());

        config.seed_url = "example.com".to_string();
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.seed_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_delay() {
        let mut config = CrawlerConfig::default();

        config.request_delay = 0.0;
        assert!(validate_crawler_config(&config).is_ok());

        config.request_delay = -0.5;
        assert!(validate_crawler_config(&config).is_err());

        config.request_delay = f64::NAN;
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_validate_timeout() {
        let mut config = CrawlerConfig::default();
        config.request_timeout = 0;
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = UserAgentConfig::default();
        assert!(validate_user_agent_config(&config).is_ok());

        config.crawler_name = String::new();
        assert!(validate_user_agent_config(&config).is_err());

        config.crawler_name = "bad name!".to_string();
        assert!(validate_user_agent_config(&config).is_err());
    }

    #[test]
    fn test_validate_output() {
        let mut config = OutputConfig::default();
        assert!(validate_output_config(&config).is_ok());

        config.file_template = String::new();
        assert!(validate_output_config(&config).is_ok());

        config.file_template = "reports/".to_string();
        assert!(validate_output_config(&config).is_err());
    }
}
