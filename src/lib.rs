//! restcurl library interface
//!
//! Translates curl command lines into typed REST request models.
//!
//! # Module Organization
//!
//! - [`curl`] - curl command import pipeline and export
//! - [`request`] - Typed request schema (RestRequest, defaults, make_request)
//! - [`errors`] - Error types (RestcurlError, Result)
//! - [`config`] - Config file loading
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - CLI execution logic

pub mod cli;
pub mod config;
pub mod core;
pub mod curl;
pub mod errors;
pub mod http;
pub mod request;
pub mod status;

pub use curl::{parse_curl_command, parse_curl_command_with, to_curl_command};
pub use errors::{RestcurlError, Result};
pub use request::RestRequest;
