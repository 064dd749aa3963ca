//! Configuration loading
//!
//! Reads `config.toml` and turns its `[defaults]` section into the default
//! request template the curl translator falls back on.

mod config;

pub use config::{Config, DefaultsConfig, CONFIG_FILE_NAME};
