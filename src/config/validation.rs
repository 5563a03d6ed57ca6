//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CampusHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(CampusHubError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(CampusHubError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CampusHubError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(CampusHubError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(CampusHubError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CampusHubError::Config(
            "Redis URL is required".to_string()
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(CampusHubError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate auth service configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(CampusHubError::Config(
            "Auth API URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url)
        .map_err(|e| CampusHubError::Config(format!("Invalid auth API URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(CampusHubError::Config(
            "Auth timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate object storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(CampusHubError::Config(
            "Storage API URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url)
        .map_err(|e| CampusHubError::Config(format!("Invalid storage API URL: {}", e)))?;

    url::Url::parse(&config.public_base_url)
        .map_err(|e| CampusHubError::Config(format!("Invalid storage public URL: {}", e)))?;

    if config.image_bucket.is_empty() || config.video_bucket.is_empty() {
        return Err(CampusHubError::Config(
            "Storage bucket names are required".to_string()
        ));
    }

    if config.max_image_bytes == 0 || config.max_video_bytes == 0 {
        return Err(CampusHubError::Config(
            "Upload size limits must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CampusHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CampusHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_empty_database_url() {
        let mut settings = Settings::default();
        settings.database.url = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_malformed_storage_url() {
        let mut settings = Settings::default();
        settings.storage.api_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
