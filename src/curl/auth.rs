//! Authentication resolution
//!
//! Precedence, highest first: `-u`, `--oauth2-bearer`, an `Authorization`
//! header, URL userinfo. Only the winning source contributes; partial
//! credentials are never merged across sources.

use base64::Engine;

use super::endpoint::ParsedUrl;
use super::flags::{self, FlagMap};
use super::headers::find_header;
use crate::http::AUTHORIZATION;
use crate::request::{ApiKeyPlacement, HeaderEntry, RestAuth};

/// Where the resolved auth came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    UserFlag,
    BearerFlag,
    Header,
    Url,
    None,
}

/// Resolved auth and the signal that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuth {
    pub auth: RestAuth,
    pub source: AuthSource,
}

/// Resolve authentication from flags, headers and URL userinfo
pub fn get_auth(flags: &FlagMap, headers: &[HeaderEntry], url: Option<&ParsedUrl>) -> ResolvedAuth {
    if let Some(user) = flags.single(flags::USER) {
        // --digest/--basic only pick the scheme curl negotiates; both map to basic
        let (username, password) = user.split_once(':').unwrap_or((user, ""));
        return ResolvedAuth {
            auth: basic(username, password),
            source: AuthSource::UserFlag,
        };
    }

    if let Some(token) = flags.single(flags::OAUTH2_BEARER) {
        return ResolvedAuth {
            auth: RestAuth::Bearer {
                token: token.to_string(),
            },
            source: AuthSource::BearerFlag,
        };
    }

    if let Some(header) = find_header(headers, AUTHORIZATION) {
        return ResolvedAuth {
            auth: parse_authorization_header(header),
            source: AuthSource::Header,
        };
    }

    if let Some((username, password)) = url.and_then(|u| u.credentials.as_ref()) {
        return ResolvedAuth {
            auth: basic(username, password),
            source: AuthSource::Url,
        };
    }

    ResolvedAuth {
        auth: RestAuth::None,
        source: AuthSource::None,
    }
}

fn basic(username: &str, password: &str) -> RestAuth {
    RestAuth::Basic {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Map an `Authorization` header onto an auth variant
///
/// Unrecognized schemes, and Basic credentials that do not decode, are kept
/// verbatim as an API key sent in the same header.
fn parse_authorization_header(header: &HeaderEntry) -> RestAuth {
    let value = header.value.trim();
    let (scheme, credentials) = value.split_once(' ').unwrap_or((value, ""));
    let credentials = credentials.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !credentials.is_empty() {
        return RestAuth::Bearer {
            token: credentials.to_string(),
        };
    }

    if scheme.eq_ignore_ascii_case("basic") {
        if let Some((username, password)) = decode_basic(credentials) {
            return basic(&username, &password);
        }
    }

    RestAuth::ApiKey {
        key: header.key.clone(),
        value: header.value.clone(),
        add_to: ApiKeyPlacement::Headers,
    }
}

fn decode_basic(encoded: &str) -> Option<(String, String)> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
