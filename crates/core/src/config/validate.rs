use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Per-keyword fetch limit is at least 1
/// - HTTP timeouts are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.watcher.per_keyword_limit == 0 {
        return Err(ConfigError::ValidationError(
            "watcher.per_keyword_limit must be at least 1".to_string(),
        ));
    }

    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "provider.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.notifier.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "notifier.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
