//! URL resolution
//!
//! Parses the target URL into the pieces the other resolvers need and
//! re-serializes the final endpoint once dangling parameters are known.

use ::url::Url;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::flags::{self, FlagMap};
use super::queries::QueryPair;

/// Characters left unescaped in appended query components
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Scheme assumed for a bare host
const DEFAULT_SCHEME: &str = "https://";

/// Target URL split into the parts the translator works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Everything before the query string, userinfo removed
    base: String,
    raw_query: Option<String>,
    fragment: Option<String>,
    /// The URL could not be parsed and is passed through as written
    opaque: bool,
    /// Decoded query pairs in order; `None` value when the segment had no `=`
    pub pairs: Vec<QueryPair>,
    /// Decoded `user:password` from the authority, if any
    pub credentials: Option<(String, String)>,
}

/// Resolve the target URL from `--url` or the first positional argument
pub fn parse_url(flags: &FlagMap) -> Option<ParsedUrl> {
    let raw = flags
        .single(flags::URL)
        .or_else(|| flags.positionals().first().map(String::as_str))?
        .trim();

    if raw.is_empty() {
        return None;
    }

    Some(ParsedUrl::parse(raw))
}

impl ParsedUrl {
    /// Parse a URL string, prefixing a scheme when it has none
    pub fn parse(raw: &str) -> Self {
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("{}{}", DEFAULT_SCHEME, raw)
        };

        match Url::parse(&with_scheme) {
            Ok(url) => Self::from_url(&url, has_explicit_path(&with_scheme)),
            Err(_) => Self {
                base: raw.to_string(),
                raw_query: None,
                fragment: None,
                opaque: true,
                pairs: Vec::new(),
                credentials: None,
            },
        }
    }

    fn from_url(url: &Url, explicit_path: bool) -> Self {
        let credentials = if url.username().is_empty() {
            None
        } else {
            Some((
                decode_component(url.username(), false),
                decode_component(url.password().unwrap_or(""), false),
            ))
        };

        let mut stripped = url.clone();
        // Setters only fail for cannot-be-a-base URLs, which carry no userinfo
        let _ = stripped.set_username("");
        let _ = stripped.set_password(None);
        stripped.set_query(None);
        stripped.set_fragment(None);

        let mut base = stripped.to_string();
        if !explicit_path && stripped.path() == "/" {
            base.pop();
        }

        let raw_query = url.query().map(String::from);
        let pairs = raw_query.as_deref().map(parse_query).unwrap_or_default();

        Self {
            base,
            raw_query,
            fragment: url.fragment().map(String::from),
            opaque: false,
            pairs,
            credentials,
        }
    }

    /// Build the endpoint string, appending extra params to the query
    ///
    /// The URL's own query string is kept as written and every given pair
    /// follows it, repeats included.
    pub fn concat_params(&self, extra: &[QueryPair]) -> String {
        let mut query = self.raw_query.clone().unwrap_or_default();

        for pair in extra {
            if !query.is_empty() {
                query.push('&');
            }
            let (key, value) = pair;
            query.push_str(&encode_component(key));
            if let Some(value) = value {
                query.push('=');
                query.push_str(&encode_component(value));
            }
        }

        let mut endpoint = self.base.clone();
        if !query.is_empty() {
            let separator = if self.opaque && endpoint.contains('?') { '&' } else { '?' };
            endpoint.push(separator);
            endpoint.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            endpoint.push('#');
            endpoint.push_str(fragment);
        }
        endpoint
    }
}

/// Whether anything follows the authority (`/`, `?` or `#`)
fn has_explicit_path(url: &str) -> bool {
    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    match after_scheme.find(['/', '?', '#']) {
        Some(pos) => after_scheme[pos..].starts_with('/'),
        None => false,
    }
}

/// Split a query string into decoded pairs
pub fn parse_query(query: &str) -> Vec<QueryPair> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode_component(key, true), Some(decode_component(value, true))),
            None => (decode_component(segment, true), None),
        })
        .collect()
}

/// Percent-decode, optionally treating `+` as a space
pub fn decode_component(s: &str, plus_as_space: bool) -> String {
    if plus_as_space && s.contains('+') {
        let replaced = s.replace('+', " ");
        percent_decode_str(&replaced).decode_utf8_lossy().into_owned()
    } else {
        percent_decode_str(s).decode_utf8_lossy().into_owned()
    }
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, QUERY_COMPONENT).to_string()
}
