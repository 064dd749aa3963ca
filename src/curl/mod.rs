//! curl command import and export
//!
//! Turns an arbitrary curl command line into a typed [`RestRequest`] and
//! back. The import pipeline never fails on malformed input: every missing
//! or broken signal degrades to a default (empty body, no auth, `GET`).
//!
//! ```text
//! raw text -> preproc -> FlagMap -> headers / method / endpoint / auth
//!          -> body (may redirect -G data) -> queries -> endpoint string
//!          -> make_request
//! ```
//!
//! # Example
//!
//! ```
//! use restcurl::curl::parse_curl_command;
//! use restcurl::request::RestBody;
//!
//! let request = parse_curl_command("curl -G -d a=1 -d b=2 https://example.com/search").unwrap();
//! assert_eq!(request.params.len(), 2);
//! assert_eq!(request.body, RestBody::Empty);
//! ```
//!
//! [`RestRequest`]: crate::request::RestRequest

pub mod auth;
pub mod body;
pub mod endpoint;
pub mod export;
pub mod flags;
pub mod headers;
pub mod method;
pub mod parser;
pub mod preproc;
pub mod queries;

pub use export::{format_curl_pretty, to_curl_command};
pub use flags::{FlagMap, FlagValue};
pub use parser::{parse_curl_command, parse_curl_command_with};
pub use preproc::preprocess_curl_command;
