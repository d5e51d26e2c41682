use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Read [`AppConfig`] from the process environment, loading a `.env` file
/// first when one is present.
///
/// # Errors
///
/// Returns `ConfigError` when a variable is malformed, or when production
/// runs without a places API key.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Read [`AppConfig`] from the process environment only; no `.env` file.
///
/// # Errors
///
/// Same as [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Assemble an [`AppConfig`] from an arbitrary variable lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let env = or_default("CURTAINCALL_ENV", "development")
        .parse::<Environment>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "CURTAINCALL_ENV".to_string(),
            reason,
        })?;
    let log_level = or_default("CURTAINCALL_LOG_LEVEL", "info");

    // An empty key is treated the same as an unset one.
    let places_api_key = lookup("GOOGLE_PLACES_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    // Production never serves the mock recommendation.
    if env.is_production() && places_api_key.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "GOOGLE_PLACES_API_KEY".to_string(),
        ));
    }

    let places_timeout_secs = parse_u64("CURTAINCALL_PLACES_TIMEOUT_SECS", "10")?;
    if places_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CURTAINCALL_PLACES_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let places_max_retries = parse_u32("CURTAINCALL_PLACES_MAX_RETRIES", "1")?;
    let places_retry_backoff_ms = parse_u64("CURTAINCALL_PLACES_RETRY_BACKOFF_MS", "250")?;
    let user_agent = or_default("CURTAINCALL_USER_AGENT", "curtaincall/0.1 (patron-email)");

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_timeout_secs,
        places_max_retries,
        places_retry_backoff_ms,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
