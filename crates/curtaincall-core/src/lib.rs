//! Shared configuration and show-timing types for curtaincall.
//!
//! Holds the environment-driven [`AppConfig`], the theatre configuration file
//! (location, search radii, recommendation categories, allow/deny lists) and
//! the per-performance show file from which availability checkpoints are
//! derived.

pub mod app_config;
pub mod config;
pub mod show;
pub mod theatre;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use show::{load_show, parse_local_datetime, parse_show, Phase, ShowInfo};
pub use theatre::{
    load_theatre_config, parse_theatre_config, BusinessCategories, Category, Coordinate,
    ListConfig, RadiusConfig, Theatre, TheatreConfig, DEFAULT_WHITELIST_RADIUS_METERS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theatre config: {0}")]
    TheatreParse(#[from] serde_yaml::Error),

    #[error("failed to parse show file: {0}")]
    ShowParse(#[from] serde_json::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
