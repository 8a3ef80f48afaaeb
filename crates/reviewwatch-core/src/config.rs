use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a `REVIEWWATCH_*` value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a `REVIEWWATCH_*` value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let data_dir = PathBuf::from(or_default("REVIEWWATCH_DATA_DIR", "./data"));
    let log_level = or_default("REVIEWWATCH_LOG_LEVEL", "info");

    let feed_base_url = or_default("REVIEWWATCH_FEED_BASE_URL", "https://itunes.apple.com");
    let feed_request_timeout_secs = parse_u64("REVIEWWATCH_FEED_REQUEST_TIMEOUT_SECS", "30")?;
    let feed_user_agent = or_default(
        "REVIEWWATCH_FEED_USER_AGENT",
        "reviewwatch/0.1 (review-monitoring)",
    );
    let feed_max_concurrent_storefronts =
        parse_usize("REVIEWWATCH_FEED_MAX_CONCURRENT_STOREFRONTS", "8")?;
    let feed_max_retries = parse_u32("REVIEWWATCH_FEED_MAX_RETRIES", "3")?;
    let feed_retry_backoff_base_ms = parse_u64("REVIEWWATCH_FEED_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        data_dir,
        log_level,
        feed_base_url,
        feed_request_timeout_secs,
        feed_user_agent,
        feed_max_concurrent_storefronts,
        feed_max_retries,
        feed_retry_backoff_base_ms,
    })
}
