use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn unknown_environment_is_rejected() {
    let map = HashMap::from([("CURTAINCALL_ENV", "staging")]);
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CURTAINCALL_ENV"));
}

#[test]
fn test_environment_is_read() {
    let map = HashMap::from([("CURTAINCALL_ENV", "test")]);
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Test);
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.places_api_key.is_none());
    assert_eq!(cfg.places_timeout_secs, 10);
    assert_eq!(cfg.places_max_retries, 1);
    assert_eq!(cfg.places_retry_backoff_ms, 250);
    assert_eq!(cfg.user_agent, "curtaincall/0.1 (patron-email)");
}

#[test]
fn build_app_config_reads_api_key() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_PLACES_API_KEY", "abc123");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_api_key.as_deref(), Some("abc123"));
}

#[test]
fn build_app_config_treats_blank_api_key_as_absent() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_PLACES_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.places_api_key.is_none());
}

#[test]
fn build_app_config_production_requires_api_key() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_PLACES_API_KEY"),
        "expected MissingEnvVar(GOOGLE_PLACES_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_production_with_key_succeeds() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_ENV", "production");
    map.insert("GOOGLE_PLACES_API_KEY", "abc123");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn places_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_PLACES_TIMEOUT_SECS", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_timeout_secs, 3);
}

#[test]
fn places_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_PLACES_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CURTAINCALL_PLACES_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CURTAINCALL_PLACES_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn places_timeout_secs_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_PLACES_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn places_max_retries_override() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_PLACES_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_max_retries, 0);
}

#[test]
fn places_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_PLACES_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CURTAINCALL_PLACES_MAX_RETRIES"),
        "expected InvalidEnvVar(CURTAINCALL_PLACES_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("CURTAINCALL_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
