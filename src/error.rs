//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Exchange outcomes are not reported through this type; see
//! [`crate::ai::ExchangeFailure`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Settings write error: {0}")]
    SettingsWrite(#[from] toml::ser::Error),

    #[error("Settings persist error: {0}")]
    SettingsPersist(#[from] tempfile::PersistError),

    #[error("{0}")]
    ImageRejected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
