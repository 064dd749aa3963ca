//! curl command translation pipeline
//!
//! Sequences the resolvers, threads the content type signal and the
//! dangling parameter list between them, and hands the result to the
//! request schema.

use tracing::{debug, trace, warn};

use super::auth::{get_auth, AuthSource, ResolvedAuth};
use super::body::{get_body, BodyInput, ResolvedBody};
use super::endpoint::parse_url;
use super::flags::{self, FlagMap};
use super::headers::{get_headers, ResolvedHeaders};
use super::method::get_method;
use super::preproc::preprocess_curl_command;
use super::queries::get_queries;
use crate::errors::Result;
use crate::http::{self, AUTHORIZATION, CONTENT_TYPE};
use crate::request::{
    default_request, make_request, HeaderEntry, RequestDefaults, RequestFields, RestBody, RestRequest,
};

/// Translate a curl command into a typed request using the built-in defaults
///
/// # Example
///
/// ```
/// use restcurl::curl::parse_curl_command;
///
/// let request = parse_curl_command("curl -X POST https://api.example.com/items -d '{\"a\":1}'").unwrap();
/// assert_eq!(request.method, "POST");
/// assert_eq!(request.endpoint, "https://api.example.com/items");
/// ```
pub fn parse_curl_command(cmd: &str) -> Result<RestRequest> {
    parse_curl_command_with(cmd, &default_request())
}

/// Translate a curl command into a typed request
///
/// `defaults` supplies the method, endpoint, header and param lists used
/// when the command leaves them unspecified, and the name and scripts the
/// translator never touches. It is only read.
pub fn parse_curl_command_with(cmd: &str, defaults: &RequestDefaults) -> Result<RestRequest> {
    let defaults = defaults.clone();
    let normalized = preprocess_curl_command(cmd);
    let flags = FlagMap::parse(&normalized);
    trace!(positionals = flags.positionals().len(), "Parsed curl flags");

    let ResolvedHeaders {
        headers,
        raw_content_type,
    } = get_headers(&flags);
    let method = get_method(&flags);
    let url = parse_url(&flags);
    let ResolvedAuth { auth, source } = get_auth(&flags, &headers, url.as_ref());

    let ResolvedBody { body, redirected } = get_body(&BodyInput {
        data: flags.list(flags::DATA),
        forms: flags.list(flags::FORM),
        literal_forms: flags.list(flags::FORM_STRING),
        raw_content_type: &raw_content_type,
        get_mode: flags.is_set(flags::GET),
    });

    // The URL's own dangling pairs already sit in its query string; only
    // the ones -G moved out of the body are appended
    let mut queries = get_queries(url.iter().flat_map(|u| u.pairs.iter()));
    let moved = get_queries(&redirected);

    let endpoint = match &url {
        Some(url) => url.concat_params(&moved.dangling),
        None => defaults.endpoint.clone(),
    };
    queries.extend(moved);

    let headers = finalize_headers(headers, source, &body);
    let method = match method {
        Some(method) => method,
        None if http::is_token(&defaults.method) => defaults.method,
        None => {
            warn!(method = %defaults.method, "Default method is not a valid token, using GET");
            http::GET.to_string()
        }
    }
    .to_uppercase();

    debug!(
        method = %method,
        endpoint = %endpoint,
        headers = headers.len(),
        params = queries.queries.len(),
        dangling = queries.dangling.len(),
        auth = auth.kind(),
        body = body_kind(&body),
        "Resolved curl command"
    );

    make_request(RequestFields {
        name: defaults.name,
        method,
        endpoint,
        params: if queries.queries.is_empty() {
            defaults.params
        } else {
            queries.queries
        },
        headers: if headers.is_empty() { defaults.headers } else { headers },
        pre_request_script: defaults.pre_request_script,
        test_script: defaults.test_script,
        auth,
        body,
    })
}

/// Reconcile the header list with the resolved auth and body
///
/// The `Authorization` header auth was read from is dropped; any others are
/// kept disabled since a higher-precedence source won. `Content-Type` is
/// dropped when the body carries its own.
fn finalize_headers(headers: Vec<HeaderEntry>, source: AuthSource, body: &RestBody) -> Vec<HeaderEntry> {
    let body_has_content_type = body.content_type().is_some();
    let mut consumed = source != AuthSource::Header;

    headers
        .into_iter()
        .filter_map(|mut header| {
            if header.key.eq_ignore_ascii_case(CONTENT_TYPE) && body_has_content_type {
                return None;
            }
            if header.key.eq_ignore_ascii_case(AUTHORIZATION) {
                if !consumed {
                    consumed = true;
                    return None;
                }
                header.enabled = false;
            }
            Some(header)
        })
        .collect()
}

fn body_kind(body: &RestBody) -> &'static str {
    match body {
        RestBody::Empty => "empty",
        RestBody::Text { .. } => "text",
        RestBody::UrlEncoded { .. } => "urlencoded",
        RestBody::Multipart { .. } => "multipart",
    }
}
