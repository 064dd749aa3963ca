//! Body resolution
//!
//! An ordered decision chain over the data and form flags. The first branch
//! that applies decides the body variant:
//!
//! 1. multipart, when any form field is present
//! 2. empty, when `-G` moves the data pairs into the query string
//! 3. URL-encoded pairs, when the content type says so
//! 4. raw text, concatenating every data occurrence
//! 5. empty
//!
//! The chain never fails; malformed pieces narrow toward text or empty.

use indexmap::IndexMap;

use super::endpoint::decode_component;
use super::queries::QueryPair;
use crate::http::{APPLICATION_JSON, FORM_URLENCODED};
use crate::request::{FormDataEntry, RestBody};

/// Everything the body chain looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyInput<'a> {
    /// Every data flag value in order (`-d` and friends)
    pub data: &'a [String],
    /// `-F` values
    pub forms: &'a [String],
    /// `--form-string` values, never interpreted as file references
    pub literal_forms: &'a [String],
    /// Content type signal from the headers
    pub raw_content_type: &'a str,
    /// `-G` was given
    pub get_mode: bool,
}

/// Resolved body plus the data pairs redirected into the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBody {
    pub body: RestBody,
    /// Pairs `-G` moves into the query, whatever the body branch
    pub redirected: Vec<QueryPair>,
}

/// Run the body decision chain
pub fn get_body(input: &BodyInput<'_>) -> ResolvedBody {
    let pairs = decode_data_pairs(input.data);
    let redirected = if input.get_mode { pairs.clone() } else { Vec::new() };

    ResolvedBody {
        body: resolve_variant(input, pairs),
        redirected,
    }
}

fn resolve_variant(input: &BodyInput<'_>, pairs: Vec<QueryPair>) -> RestBody {
    if !input.forms.is_empty() || !input.literal_forms.is_empty() {
        return multipart_body(input.forms, input.literal_forms);
    }

    if input.get_mode && !pairs.is_empty() {
        return RestBody::Empty;
    }

    let is_urlencoded = input
        .raw_content_type
        .to_ascii_lowercase()
        .contains(FORM_URLENCODED);
    if is_urlencoded && pairs.iter().any(|(_, value)| value.is_some()) {
        let pairs = pairs
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect();
        return RestBody::UrlEncoded { pairs };
    }

    // Repeated -d values are concatenated as written
    let content = input.data.concat();
    if !content.is_empty() {
        let content_type = text_content_type(&content, input.raw_content_type);
        return RestBody::Text { content, content_type };
    }

    RestBody::Empty
}

/// Split data into decoded pairs: `&` between pairs, first `=` within one
///
/// A segment without `=` is kept whole as the key with no value.
pub fn decode_data_pairs(data: &[String]) -> Vec<QueryPair> {
    data.iter()
        .flat_map(|item| item.split('&'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode_component(key, true), Some(decode_component(value, true))),
            None => (decode_component(segment, true), None),
        })
        .collect()
}

fn text_content_type(content: &str, raw_content_type: &str) -> Option<String> {
    if !raw_content_type.is_empty() {
        return Some(raw_content_type.to_string());
    }

    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) if value.is_object() || value.is_array() => Some(APPLICATION_JSON.to_string()),
        _ => None,
    }
}

/// Build the multipart entries; a later field with the same name replaces
/// the earlier value in place
fn multipart_body(forms: &[String], literal_forms: &[String]) -> RestBody {
    let mut entries: IndexMap<String, FormDataEntry> = IndexMap::new();

    for field in forms {
        if let Some((name, value)) = field.split_once('=') {
            entries.insert(name.to_string(), parse_form_value(value));
        }
    }

    for field in literal_forms {
        if let Some((name, value)) = field.split_once('=') {
            entries.insert(name.to_string(), FormDataEntry::text(value));
        }
    }

    RestBody::Multipart { entries }
}

/// Interpret a `-F` value: `@path` uploads a file, anything else
/// (including `<path` content references) is kept as text. Both forms take
/// trailing `;type=mime` style attributes.
fn parse_form_value(value: &str) -> FormDataEntry {
    let (value, content_type) = split_form_attributes(value);

    match value.strip_prefix('@') {
        Some(path) => FormDataEntry::file(path, content_type),
        None => FormDataEntry {
            value: unquote(value).to_string(),
            is_file: false,
            content_type,
        },
    }
}

/// Attributes curl accepts after a `-F` value
const FORM_ATTRIBUTES: &[&str] = &["type=", "filename=", "headers=", "encoder="];

/// Split `value;type=...;filename=...` into the value and its content type
///
/// A `;` only starts the attribute list when everything after it is made of
/// known attributes, so `a;b` stays a plain value.
fn split_form_attributes(value: &str) -> (&str, Option<String>) {
    let search_from = quoted_len(value).unwrap_or(0);

    for (pos, _) in value[search_from..].match_indices(';') {
        let pos = search_from + pos;
        let attributes: Vec<&str> = value[pos + 1..].split(';').map(str::trim).collect();
        let all_known = attributes
            .iter()
            .all(|attr| FORM_ATTRIBUTES.iter().any(|known| attr.starts_with(known)));

        if all_known {
            let content_type = attributes
                .iter()
                .find_map(|attr| attr.strip_prefix("type="))
                .map(String::from);
            return (&value[..pos], content_type);
        }
    }

    (value, None)
}

/// Byte length of a leading `"..."` value, closing quote included
fn quoted_len(value: &str) -> Option<usize> {
    let rest = value.strip_prefix('"')?;
    rest.find('"').map(|end| end + 2)
}

fn unquote(value: &str) -> &str {
    match quoted_len(value) {
        Some(len) if len == value.len() => &value[1..len - 1],
        _ => value,
    }
}
