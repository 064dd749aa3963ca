//! Config file handling

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::RestcurlError;
use crate::http;
use crate::request::{default_request, HeaderEntry, RequestDefaults};

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `[defaults]` section: overrides for the default request template
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub name: Option<String>,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub pre_request_script: Option<String>,
    pub test_script: Option<String>,
    /// Headers used when a command declares none
    pub headers: IndexMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    defaults: DefaultsConfig,
}

/// restcurl configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self, RestcurlError> {
        Self::load_from(&Self::default_config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, RestcurlError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using built-in defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let parsed: ConfigFile = toml::from_str(&content)?;

        debug!(path = %path.display(), "Loaded config file");

        Ok(Self {
            defaults: parsed.defaults,
        })
    }

    /// Default request template with the configured overrides applied
    pub fn request_defaults(&self) -> RequestDefaults {
        let mut defaults = default_request();
        let overrides = &self.defaults;

        if let Some(name) = &overrides.name {
            defaults.name = name.clone();
        }
        match overrides.endpoint.as_deref().map(str::trim) {
            Some("") => warn!("Ignoring empty default endpoint"),
            Some(endpoint) => defaults.endpoint = endpoint.to_string(),
            None => {}
        }
        match overrides.method.as_deref().map(str::trim) {
            Some(method) if http::is_token(method) => defaults.method = method.to_uppercase(),
            Some(method) => warn!(method = %method, "Ignoring invalid default method"),
            None => {}
        }
        if let Some(script) = &overrides.pre_request_script {
            defaults.pre_request_script = script.clone();
        }
        if let Some(script) = &overrides.test_script {
            defaults.test_script = script.clone();
        }
        if !overrides.headers.is_empty() {
            defaults.headers = overrides
                .headers
                .iter()
                .map(|(key, value)| HeaderEntry::new(key, value))
                .collect();
        }

        defaults
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("restcurl"))
            .unwrap_or_else(|| PathBuf::from(".restcurl"))
    }
}
