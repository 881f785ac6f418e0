//! Configuration validation.

use super::{Config, EndpointConfig};
use crate::error::{MigrateError, Result};
use reqwest::Url;

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    validate_endpoint("source", &config.source)?;
    validate_endpoint("destination", &config.destination)?;

    if config.migration.collection.trim().is_empty() {
        return Err(MigrateError::Config("collection is required".into()));
    }
    if config.migration.match_field.trim().is_empty() {
        return Err(MigrateError::Config("match field is required".into()));
    }

    if let Some(0) = config.migration.page_size {
        return Err(MigrateError::Config("page size must be at least 1".into()));
    }

    if let Some(ref fields) = config.migration.payload_fields {
        if fields.is_empty() {
            return Err(MigrateError::Config(
                "at least one payload field is required".into(),
            ));
        }
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(MigrateError::Config(
                "payload field names cannot be empty".into(),
            ));
        }
    }

    Ok(())
}

fn validate_endpoint(name: &str, endpoint: &EndpointConfig) -> Result<()> {
    let url = Url::parse(&endpoint.base_url).map_err(|e| {
        MigrateError::Config(format!(
            "{} API URL '{}' is invalid: {}",
            name, endpoint.base_url, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(MigrateError::Config(format!(
            "{} API URL must use http or https, got '{}'",
            name,
            url.scheme()
        )));
    }

    if endpoint.token.is_empty() {
        return Err(MigrateError::Config(format!("{} API token is required", name)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigrationConfig;

    fn valid_config() -> Config {
        Config {
            source: EndpointConfig::new("https://source.example.com", "src"),
            destination: EndpointConfig::new("http://localhost:1337", "dst"),
            migration: MigrationConfig::new("agenda-formats", "agendaFormatName"),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_relative_url_rejected() {
        let mut config = valid_config();
        config.source.base_url = "cms.example.com".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.destination.base_url = "ftp://cms.example.com".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_collection_rejected() {
        let mut config = valid_config();
        config.migration.collection = " ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_match_field_rejected() {
        let mut config = valid_config();
        config.migration.match_field = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = valid_config();
        config.migration.page_size = Some(0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_payload_field_list_rejected() {
        let mut config = valid_config();
        config.migration.payload_fields = Some(vec![]);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_endpoint_debug_redacts_token() {
        let mut config = valid_config();
        config.source.token = "super_secret_token_123".to_string();
        let debug_output = format!("{:?}", config.source);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_token_123"),
            "Debug output should not contain actual token value"
        );
    }
}
