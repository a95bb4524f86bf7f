//! Shared domain types and configuration for BrandPulse.
//!
//! Defines the `Mention` data model (source, sentiment, and topic
//! enumerations included) consumed by the source adapters, the tracking
//! engine, and the HTTP server, plus env-based application configuration.

mod app_config;
mod config;
mod mention;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use mention::{Mention, RawMention, Sentiment, Source, Topic};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
