//! Request schema data structures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::http::{FORM_URLENCODED, MULTIPART_FORM_DATA};

/// An ordered key/value entry that can be switched off without removing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl KeyValue {
    /// Create an enabled entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// Request header. Duplicate keys are kept as separate entries.
pub type HeaderEntry = KeyValue;

/// Query parameter. Duplicate keys are legal.
pub type QueryParam = KeyValue;

/// Where an API key is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiKeyPlacement {
    #[default]
    Headers,
    QueryParams,
}

/// Request authentication, exactly one variant active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "authType")]
pub enum RestAuth {
    #[default]
    #[serde(rename = "none")]
    None,

    #[serde(rename = "basic")]
    Basic { username: String, password: String },

    #[serde(rename = "bearer")]
    Bearer { token: String },

    #[serde(rename = "api-key", rename_all = "camelCase")]
    ApiKey {
        key: String,
        value: String,
        add_to: ApiKeyPlacement,
    },

    #[serde(rename = "oauth-2", rename_all = "camelCase")]
    OAuth2 {
        access_token: String,
        auth_url: String,
        access_token_url: String,
        client_id: String,
        scope: String,
    },
}

impl RestAuth {
    /// Name of the active variant, as it appears in serialized form
    pub fn kind(&self) -> &'static str {
        match self {
            RestAuth::None => "none",
            RestAuth::Basic { .. } => "basic",
            RestAuth::Bearer { .. } => "bearer",
            RestAuth::ApiKey { .. } => "api-key",
            RestAuth::OAuth2 { .. } => "oauth-2",
        }
    }
}

/// One multipart form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDataEntry {
    /// Field value, or the file path when `is_file` is set
    pub value: String,
    /// The field is a file upload (`name=@path`); the file itself is never read
    pub is_file: bool,
    /// Explicit part content type (`;type=...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FormDataEntry {
    /// Plain text field
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_file: false,
            content_type: None,
        }
    }

    /// File upload field
    pub fn file(path: impl Into<String>, content_type: Option<String>) -> Self {
        Self {
            value: path.into(),
            is_file: true,
            content_type,
        }
    }
}

/// Request body, exactly one variant active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RestBody {
    #[default]
    Empty,

    #[serde(rename_all = "camelCase")]
    Text {
        content: String,
        content_type: Option<String>,
    },

    UrlEncoded { pairs: Vec<(String, String)> },

    Multipart { entries: IndexMap<String, FormDataEntry> },
}

impl RestBody {
    /// Content type carried by the body itself
    pub fn content_type(&self) -> Option<&str> {
        match self {
            RestBody::Empty => None,
            RestBody::Text { content_type, .. } => content_type.as_deref(),
            RestBody::UrlEncoded { .. } => Some(FORM_URLENCODED),
            RestBody::Multipart { .. } => Some(MULTIPART_FORM_DATA),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RestBody::Empty)
    }
}

/// A fully typed REST request stamped with its schema version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestRequest {
    /// Schema version tag
    pub v: String,
    pub name: String,
    pub method: String,
    pub endpoint: String,
    pub params: Vec<QueryParam>,
    pub headers: Vec<HeaderEntry>,
    pub pre_request_script: String,
    pub test_script: String,
    pub auth: RestAuth,
    pub body: RestBody,
}
