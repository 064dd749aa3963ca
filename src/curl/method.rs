//! Method resolution
//!
//! Returns `None` when the command line says nothing about the method, so
//! the caller can fall back to the default request's method. Case is left
//! as written.

use tracing::warn;

use super::flags::{self, FlagMap};
use crate::http;

/// Resolve the HTTP method from the flag map
///
/// An `-X` value that is not a valid method token counts as unspecified.
pub fn get_method(flags: &FlagMap) -> Option<String> {
    if let Some(method) = flags.single(flags::REQUEST).map(str::trim) {
        if http::is_token(method) {
            return Some(method.to_string());
        }
        if !method.is_empty() {
            warn!(method = %method, "Ignoring invalid request method");
        }
    }

    if flags.is_set(flags::HEAD) {
        return Some(http::HEAD.to_string());
    }

    if flags.is_set(flags::GET) {
        return Some(http::GET.to_string());
    }

    if flags.is_set(flags::UPLOAD_FILE) {
        return Some(http::PUT.to_string());
    }

    let has_data = [flags::DATA, flags::FORM, flags::FORM_STRING]
        .iter()
        .any(|key| !flags.list(key).is_empty());
    if has_data {
        return Some(http::infer(true).to_string());
    }

    None
}
