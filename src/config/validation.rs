use crate::config::types::{
    Config, DnsConfig, HttpConfig, InputConfig, OutputConfig, ScraperConfig, SuggestionConfig,
};
use crate::ConfigError;
use url::Url;

/// Upper bound for either concurrency gate
const MAX_CONCURRENCY: usize = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_suggestion_config(&config.suggestion)?;
    validate_scraper_config(&config.scraper)?;
    validate_dns_config(&config.dns)?;
    validate_http_config(&config.http)?;
    validate_columns(&config.input, &config.output)?;
    Ok(())
}

/// Validates suggestion client configuration
fn validate_suggestion_config(config: &SuggestionConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid suggestion endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Suggestion endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "suggestion timeout-secs must be > 0".to_string(),
        ));
    }

    if config.max_candidates < 1 {
        return Err(ConfigError::Validation(
            "max-candidates must be >= 1".to_string(),
        ));
    }

    validate_concurrency("max-concurrent-lookups", config.max_concurrent_lookups)
}

/// Validates site scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.homepage_timeout_secs == 0 || config.secondary_timeout_secs == 0 {
        return Err(ConfigError::Validation(format!(
            "scraper timeouts must be > 0, got homepage={}s secondary={}s",
            config.homepage_timeout_secs, config.secondary_timeout_secs
        )));
    }

    // Shortest plausible address is a@b.cd
    if config.max_email_length < 6 {
        return Err(ConfigError::Validation(format!(
            "max-email-length must be >= 6, got {}",
            config.max_email_length
        )));
    }

    validate_concurrency("max-concurrent-scrapes", config.max_concurrent_scrapes)
}

fn validate_dns_config(config: &DnsConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "dns timeout-secs must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates the input and output column names
fn validate_columns(input: &InputConfig, output: &OutputConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("name-column", &input.name_column),
        ("website-column", &output.website_column),
        ("email-column", &output.email_column),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    if output.website_column == output.email_column {
        return Err(ConfigError::Validation(format!(
            "website-column and email-column must differ, both are '{}'",
            output.email_column
        )));
    }

    Ok(())
}

fn validate_concurrency(key: &str, value: usize) -> Result<(), ConfigError> {
    if value < 1 || value > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            key, MAX_CONCURRENCY, value
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
    fn test_validate_endpoint() {
        let mut config = Config::default();
        config.suggestion.endpoint = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.suggestion.endpoint = "ftp://suggest.example.com/".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.suggestion.endpoint = "http://127.0.0.1:8080/suggest".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        let mut config = Config::default();
        config.suggestion.max_concurrent_lookups = 0;
        assert!(validate(&config).is_err());

        config.suggestion.max_concurrent_lookups = 501;
        assert!(validate(&config).is_err());

        config.suggestion.max_concurrent_lookups = 500;
        assert!(validate(&config).is_ok());

        config.scraper.max_concurrent_scrapes = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = Config::default();
        config.scraper.secondary_timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.suggestion.timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.dns.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_columns() {
        let mut config = Config::default();
        config.output.email_column = "Website".to_string();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.input.name_column = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_email_length() {
        let mut config = Config::default();
        config.scraper.max_email_length = 5;
        assert!(validate(&config).is_err());
    }
}
