use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any configured value fails to parse.
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
/// Returns `ConfigError` if any configured value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("BRANDPULSE_ENV", "development"));

    let bind_addr = parse_addr("BRANDPULSE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("BRANDPULSE_LOG_LEVEL", "info");

    let provider_timeout_secs = parse_u64("BRANDPULSE_PROVIDER_TIMEOUT_SECS", "10")?;
    let refresh_interval_secs = parse_u64("BRANDPULSE_REFRESH_INTERVAL_SECS", "300")?;
    let user_agent = or_default(
        "BRANDPULSE_USER_AGENT",
        "Mozilla/5.0 (compatible; BrandPulse/0.1)",
    );

    let news_api_key = lookup("NEWS_API_KEY").ok().filter(|k| !k.is_empty());
    let video_api_key = lookup("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider_timeout_secs,
        refresh_interval_secs,
        user_agent,
        news_api_key,
        video_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
