//! Request construction
//!
//! `default_request` supplies fallback values for everything a command line
//! can leave unspecified; `make_request` validates the assembled fields and
//! stamps them with the current schema version.

use serde::{Deserialize, Serialize};

use crate::errors::RestcurlError;
use crate::http;
use super::types::{HeaderEntry, QueryParam, RestAuth, RestBody, RestRequest};

/// Current schema version tag
pub const REQUEST_SCHEMA_VERSION: &str = "1";

/// Request fields before the schema version is stamped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFields {
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

/// Fallback values used when a command line under-specifies a request
pub type RequestDefaults = RequestFields;

impl Default for RequestFields {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            method: http::GET.to_string(),
            endpoint: "https://echo.hoppscotch.io".to_string(),
            params: Vec::new(),
            headers: Vec::new(),
            pre_request_script: String::new(),
            test_script: String::new(),
            auth: RestAuth::None,
            body: RestBody::Empty,
        }
    }
}

/// Built-in default request template
pub fn default_request() -> RequestDefaults {
    RequestFields::default()
}

/// Validate the fields and stamp them with the schema version
pub fn make_request(fields: RequestFields) -> Result<RestRequest, RestcurlError> {
    if !http::is_token(&fields.method) {
        return Err(RestcurlError::Schema(format!(
            "Invalid request method: {:?}",
            fields.method
        )));
    }

    if fields.endpoint.trim().is_empty() {
        return Err(RestcurlError::Schema("Request endpoint is empty".to_string()));
    }

    Ok(RestRequest {
        v: REQUEST_SCHEMA_VERSION.to_string(),
        name: fields.name,
        method: fields.method,
        endpoint: fields.endpoint,
        params: fields.params,
        headers: fields.headers,
        pre_request_script: fields.pre_request_script,
        test_script: fields.test_script,
        auth: fields.auth,
        body: fields.body,
    })
}
