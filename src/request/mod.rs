//! Typed REST request model
//!
//! This is the destination schema the curl translator builds into: a
//! versioned request entity, a factory for its default values, and the
//! constructor that stamps the schema version.

mod builder;
mod types;

pub use builder::{default_request, make_request, RequestDefaults, RequestFields, REQUEST_SCHEMA_VERSION};
pub use types::{
    ApiKeyPlacement, FormDataEntry, HeaderEntry, KeyValue, QueryParam, RestAuth, RestBody, RestRequest,
};
