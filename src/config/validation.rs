use crate::config::types::{Config, FetcherConfig, StorageConfig};
use crate::ConfigError;

/// Upper bound for either timeout (10 minutes)
pub const MAX_TIMEOUT_MS: u64 = 600_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates fetcher configuration
///
/// A request timeout shorter than the connect timeout is allowed; it matches
/// the defaults.
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    validate_timeout("connect-timeout-ms", config.connect_timeout_ms)?;
    validate_timeout("request-timeout-ms", config.request_timeout_ms)?;
    Ok(())
}

fn validate_timeout(name: &str, value: u64) -> Result<(), ConfigError> {
    if !(1..=MAX_TIMEOUT_MS).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_TIMEOUT_MS, value
        )));
    }
    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}
