use std::str::FromStr;

/// Deployment environment, from `CURTAINCALL_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    #[must_use]
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Process-level settings. Built once at startup and passed down explicitly;
/// nothing below the binary reads the environment itself.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Places provider key. `None` selects the mock recommendation path.
    pub places_api_key: Option<String>,
    pub places_timeout_secs: u64,
    pub places_max_retries: u32,
    pub places_retry_backoff_ms: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_timeout_secs", &self.places_timeout_secs)
            .field("places_max_retries", &self.places_max_retries)
            .field("places_retry_backoff_ms", &self.places_retry_backoff_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            places_api_key: Some("super-secret".to_string()),
            places_timeout_secs: 10,
            places_max_retries: 1,
            places_retry_backoff_ms: 250,
            user_agent: "curtaincall-test/0.1".to_string(),
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"), "key leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn environment_round_trips_through_display() {
        for env in [
            Environment::Development,
            Environment::Test,
            Environment::Production,
        ] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn environment_accepts_short_forms_and_case() {
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" dev ".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }
}
