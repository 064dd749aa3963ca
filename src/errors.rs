//! Error types for restcurl
//!
//! The curl translator itself never fails on malformed input. `Schema` is
//! raised by `make_request` for fields the translator never produces; the
//! other variants belong to the CLI and configuration layers.

use thiserror::Error;

/// Main error type for restcurl
#[derive(Error, Debug)]
pub enum RestcurlError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RestcurlError>;
