//! Header resolution
//!
//! Builds the ordered header list from `-H` flags (plus the headers curl
//! synthesizes from `-A`, `-e` and `-b`) and extracts the raw content type
//! signal the body resolver starts from.

use super::flags::{self, FlagMap};
use crate::http::CONTENT_TYPE;
use crate::request::HeaderEntry;

/// Headers plus the content type signal found among them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedHeaders {
    pub headers: Vec<HeaderEntry>,
    /// Value of the first `Content-Type` header, or empty
    pub raw_content_type: String,
}

/// Resolve headers from the flag map
pub fn get_headers(flags: &FlagMap) -> ResolvedHeaders {
    let mut headers: Vec<HeaderEntry> = flags
        .list(flags::HEADER)
        .iter()
        .filter_map(|line| parse_header(line))
        .collect();

    if let Some(agent) = flags.single(flags::USER_AGENT) {
        push_unless_present(&mut headers, "User-Agent", agent);
    }

    if let Some(referer) = flags.single(flags::REFERER) {
        push_unless_present(&mut headers, "Referer", referer);
    }

    // A -b value without '=' names a cookie file, which is never read
    let cookies: Vec<&str> = flags
        .list(flags::COOKIE)
        .iter()
        .map(String::as_str)
        .filter(|c| c.contains('='))
        .collect();
    if !cookies.is_empty() {
        push_unless_present(&mut headers, "Cookie", &cookies.join("; "));
    }

    let raw_content_type = find_header(&headers, CONTENT_TYPE)
        .map(|h| h.value.clone())
        .unwrap_or_default();

    ResolvedHeaders {
        headers,
        raw_content_type,
    }
}

/// First header with the given name, compared case-insensitively
pub fn find_header<'a>(headers: &'a [HeaderEntry], name: &str) -> Option<&'a HeaderEntry> {
    headers.iter().find(|h| h.key.eq_ignore_ascii_case(name))
}

fn push_unless_present(headers: &mut Vec<HeaderEntry>, name: &str, value: &str) {
    if find_header(headers, name).is_none() {
        headers.push(HeaderEntry::new(name, value));
    }
}

/// Parse a header string "Name: Value"
///
/// curl's `Name;` form declares a header with an empty value.
fn parse_header(header: &str) -> Option<HeaderEntry> {
    let (name, value) = match header.split_once(':') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (header.trim().strip_suffix(';')?.trim(), ""),
    };

    if name.is_empty() {
        return None;
    }

    Some(HeaderEntry::new(name, value))
}
