//! HTTP protocol types and constants
//!
//! Method names and the well-known header and content type strings the
//! curl translator keys its decisions on.

mod method;

pub use method::*;

/// `Content-Type` header name
pub const CONTENT_TYPE: &str = "Content-Type";

/// `Authorization` header name
pub const AUTHORIZATION: &str = "Authorization";

/// Content type of URL-encoded form bodies
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Content type of multipart form bodies
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Content type inferred for JSON-shaped text bodies
pub const APPLICATION_JSON: &str = "application/json";
