//! Curl command generation
//!
//! Renders a typed request back into a single-line curl command for
//! sharing and debugging. Importing the generated command yields the same
//! method, endpoint, headers, auth and body.

use super::endpoint::ParsedUrl;
use crate::http::{self, AUTHORIZATION, CONTENT_TYPE};
use crate::request::{ApiKeyPlacement, RestAuth, RestBody, RestRequest};

/// Generate an equivalent curl command from the request
pub fn to_curl_command(request: &RestRequest) -> String {
    let mut parts: Vec<String> = vec!["curl".to_string()];

    // -X only when the method differs from what curl would pick itself
    if request.method != http::infer(!request.body.is_empty()) {
        parts.push("-X".to_string());
        parts.push(request.method.clone());
    }

    for header in request.headers.iter().filter(|h| h.enabled) {
        push_header(&mut parts, &header.key, &header.value);
    }

    let mut extra_params: Vec<(String, Option<String>)> = request
        .params
        .iter()
        .filter(|p| p.enabled)
        .map(|p| (p.key.clone(), Some(p.value.clone())))
        .collect();

    match &request.auth {
        RestAuth::None => {}
        RestAuth::Basic { username, password } => {
            parts.push("-u".to_string());
            parts.push(shell_escape(&format!("{}:{}", username, password)));
        }
        RestAuth::Bearer { token } => {
            push_header(&mut parts, AUTHORIZATION, &format!("Bearer {}", token));
        }
        RestAuth::OAuth2 { access_token, .. } => {
            push_header(&mut parts, AUTHORIZATION, &format!("Bearer {}", access_token));
        }
        RestAuth::ApiKey { key, value, add_to } => match add_to {
            ApiKeyPlacement::Headers => push_header(&mut parts, key, value),
            ApiKeyPlacement::QueryParams => extra_params.push((key.clone(), Some(value.clone()))),
        },
    }

    match &request.body {
        RestBody::Empty => {}
        RestBody::Text { content, content_type } => {
            if let Some(content_type) = content_type {
                push_header(&mut parts, CONTENT_TYPE, content_type);
            }
            parts.push("--data-raw".to_string());
            parts.push(shell_escape(content));
        }
        RestBody::UrlEncoded { pairs } => {
            push_header(&mut parts, CONTENT_TYPE, http::FORM_URLENCODED);
            for (key, value) in pairs {
                parts.push("-d".to_string());
                parts.push(shell_escape(&format!("{}={}", percent_encode(key), percent_encode(value))));
            }
        }
        RestBody::Multipart { entries } => {
            for (name, entry) in entries {
                if entry.is_file {
                    let mut field = format!("{}=@{}", name, entry.value);
                    if let Some(content_type) = &entry.content_type {
                        field.push_str(";type=");
                        field.push_str(content_type);
                    }
                    parts.push("-F".to_string());
                    parts.push(shell_escape(&field));
                } else if let (Some(content_type), false) =
                    (&entry.content_type, entry.value.starts_with(['@', '<', '"']))
                {
                    parts.push("-F".to_string());
                    parts.push(shell_escape(&format!("{}={};type={}", name, entry.value, content_type)));
                } else {
                    parts.push("--form-string".to_string());
                    parts.push(shell_escape(&format!("{}={}", name, entry.value)));
                }
            }
        }
    }

    // Params the endpoint does not already carry go through -G when curl
    // would keep the method, otherwise straight into the URL
    let endpoint = ParsedUrl::parse(&request.endpoint);
    extra_params.retain(|pair| !endpoint.pairs.contains(pair));

    let url = if !extra_params.is_empty() && request.method == http::GET && request.body.is_empty() {
        parts.push("-G".to_string());
        for (key, value) in &extra_params {
            parts.push("-d".to_string());
            parts.push(shell_escape(&format!(
                "{}={}",
                percent_encode(key),
                percent_encode(value.as_deref().unwrap_or_default())
            )));
        }
        endpoint.concat_params(&[])
    } else {
        endpoint.concat_params(&extra_params)
    };

    // URL always last
    parts.push(shell_escape(&url));

    parts.join(" ")
}

fn push_header(parts: &mut Vec<String>, name: &str, value: &str) {
    parts.push("-H".to_string());
    parts.push(shell_escape(&format!("{}: {}", name, value)));
}

/// Shell-escape a string for safe inclusion in a command
fn shell_escape(s: &str) -> String {
    let needs_escaping = s.chars().any(|c| {
        matches!(c, ' ' | '\'' | '"' | '\\' | '$' | '`' | '!' | '*' | '?' |
                    '[' | ']' | '{' | '}' | '(' | ')' | '<' | '>' | '|' |
                    '&' | ';' | '#' | '~' | '\n' | '\t')
    });

    if !needs_escaping && !s.is_empty() {
        return s.to_string();
    }

    // Single quotes throughout, with embedded single quotes spliced in
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

/// Percent-encode a string for form data
fn percent_encode(s: &str) -> String {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// Format a curl command with ANSI colors for terminal output
pub fn format_curl_pretty(cmd: &str) -> String {
    let mut result = String::new();
    let mut in_string = false;
    let mut chars = cmd.chars().peekable();

    if let Some(rest) = cmd.strip_prefix("curl") {
        result.push_str("\x1b[1;33mcurl\x1b[0m");
        chars = rest.chars().peekable();
    }

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_string => {
                in_string = true;
                result.push_str("\x1b[32m'");
            }
            '\'' => {
                in_string = false;
                result.push_str("'\x1b[0m");
            }
            '-' if !in_string => {
                result.push_str("\x1b[36m-");
                while let Some(next) = chars.next_if(|n| n.is_alphanumeric() || *n == '-') {
                    result.push(next);
                }
                result.push_str("\x1b[0m");
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::parse_curl_command;

    #[test]
    fn test_shell_escape_simple() {
        assert_eq!(shell_escape("hello"), "hello");
        assert_eq!(shell_escape("hello world"), "'hello world'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_shell_escape_quotes() {
        assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn test_shell_escape_special_chars() {
        assert_eq!(shell_escape("$HOME"), "'$HOME'");
        assert_eq!(shell_escape("a & b"), "'a & b'");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("hello"), "hello");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("a=b"), "a%3Db");
    }

    #[test]
    fn test_simple_get() {
        let request = parse_curl_command("curl https://example.com/users").unwrap();
        assert_eq!(to_curl_command(&request), "curl https://example.com/users");
    }

    #[test]
    fn test_json_post() {
        let request = parse_curl_command(
            r#"curl -X POST https://api.example.com/items -H 'Content-Type: application/json' -d '{"name":"widget"}'"#,
        )
        .unwrap();
        assert_eq!(
            to_curl_command(&request),
            r#"curl -H 'Content-Type: application/json' --data-raw '{"name":"widget"}' https://api.example.com/items"#
        );
    }

    #[test]
    fn test_explicit_method_kept() {
        let request = parse_curl_command("curl -X DELETE https://example.com/users/1").unwrap();
        assert_eq!(to_curl_command(&request), "curl -X DELETE https://example.com/users/1");
    }

    #[test]
    fn test_auth_rendering() {
        let request = parse_curl_command("curl -u 'alice:s3cret' https://example.com").unwrap();
        assert_eq!(to_curl_command(&request), "curl -u alice:s3cret https://example.com");

        let request = parse_curl_command("curl -H 'Authorization: Bearer tok' https://example.com").unwrap();
        assert_eq!(
            to_curl_command(&request),
            "curl -H 'Authorization: Bearer tok' https://example.com"
        );
    }

    #[test]
    fn test_get_params_exported_with_get_flag() {
        let request = parse_curl_command("curl -G -d q=rust https://a.com/search").unwrap();
        assert_eq!(to_curl_command(&request), "curl -G -d q=rust https://a.com/search");
    }

    #[test]
    fn test_params_appended_to_url_for_other_methods() {
        let request = parse_curl_command("curl -X DELETE -G -d id=7 https://a.com/items").unwrap();
        assert_eq!(to_curl_command(&request), "curl -X DELETE 'https://a.com/items?id=7'");
    }

    #[test]
    fn test_round_trip() {
        let commands = [
            "curl -d a=1 -d 'b=two words' -H 'Content-Type: application/x-www-form-urlencoded' https://a.com/form",
            "curl -F 'doc=@report.pdf;type=application/pdf' -F 'note=<literal' https://a.com/upload",
            r#"curl -F 'meta={"a":1};type=application/json' -F 'tag=x;y' https://a.com/upload"#,
            "curl -G -d q=rust -d flag 'https://a.com/search?page=2'",
            "curl -X PUT -H 'X-Trace: 1' -H 'Authorization: Token abc' --data-raw 'plain text' https://a.com/t",
        ];

        for cmd in commands {
            let first = parse_curl_command(cmd).unwrap();
            let exported = to_curl_command(&first);
            let second = parse_curl_command(&exported).unwrap();
            assert_eq!(first.method, second.method, "method for {}", exported);
            assert_eq!(first.endpoint, second.endpoint, "endpoint for {}", exported);
            assert_eq!(first.headers, second.headers, "headers for {}", exported);
            assert_eq!(first.auth, second.auth, "auth for {}", exported);
            assert_eq!(first.body, second.body, "body for {}", exported);
        }
    }

    #[test]
    fn test_format_curl_pretty() {
        let pretty = format_curl_pretty("curl -X 'POST' a.com");
        assert!(pretty.starts_with("\x1b[1;33mcurl\x1b[0m"));
        assert!(pretty.contains("\x1b[36m-X\x1b[0m"));
        assert!(pretty.contains("\x1b[32m'POST'\x1b[0m"));
    }
}
