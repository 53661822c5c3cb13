//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{Result, UniEventsError};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;
    validate_app_config(&settings.app)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(UniEventsError::Config(
            "Server host is required".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(UniEventsError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(UniEventsError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(UniEventsError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(UniEventsError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(UniEventsError::Config("Redis URL is required".to_string()));
    }

    if config.ttl_seconds == 0 {
        return Err(UniEventsError::Config(
            "Redis TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(UniEventsError::Config(
            "JWT secret is required".to_string(),
        ));
    }

    if config.session_ttl_seconds == 0 {
        return Err(UniEventsError::Config(
            "Session TTL must be greater than 0".to_string(),
        ));
    }

    if config.min_password_length < 4 {
        return Err(UniEventsError::Config(
            "Minimum password length must be at least 4".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(UniEventsError::Config(
            "Logging level is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate application configuration
fn validate_app_config(config: &super::AppConfig) -> Result<()> {
    if config.public_base_url.is_empty() {
        return Err(UniEventsError::Config(
            "Public base URL is required".to_string(),
        ));
    }

    url::Url::parse(&config.public_base_url).map_err(|e| {
        UniEventsError::Config(format!("Public base URL is not a valid URL: {}", e))
    })?;

    Ok(())
}
