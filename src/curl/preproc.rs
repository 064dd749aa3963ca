//! Textual normalization of a raw curl command line
//!
//! Runs before tokenization and knows nothing about flags. The output is
//! always a string, whatever the input looked like.

use std::iter::Peekable;
use std::str::Chars;

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading program token, matched as a whole word
static PROGRAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^curl(?:\.exe)?(?:\s+|$)").expect("Invalid program regex")
});

/// Normalize a command line so it can be tokenized safely
pub fn preprocess_curl_command(cmd: &str) -> String {
    let cmd = normalize_typographic_quotes(cmd);
    let cmd = collapse_continuations(&cmd);
    let cmd = rewrite_ansi_c_quotes(&cmd);
    let cmd = cmd.trim();
    PROGRAM_RE.replace(cmd, "").trim().to_string()
}

/// Replace the curly quotes word processors and chat clients substitute
fn normalize_typographic_quotes(cmd: &str) -> String {
    cmd.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            _ => c,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
    AnsiC,
}

/// Join continued lines: POSIX `\`, cmd.exe `^` and PowerShell backtick
///
/// Only unquoted markers count. Inside single quotes every character is
/// literal; inside double quotes a backslash-newline is removed as the
/// shell does.
fn collapse_continuations(cmd: &str) -> String {
    let mut out = String::with_capacity(cmd.len());
    let mut chars = cmd.chars().peekable();
    let mut quote: Option<Quote> = None;
    let mut after_dollar = false;

    while let Some(c) = chars.next() {
        let was_dollar = std::mem::replace(&mut after_dollar, false);

        match (quote, c) {
            (Some(Quote::Single), '\'') | (Some(Quote::AnsiC), '\'') | (Some(Quote::Double), '"') => {
                quote = None;
                out.push(c);
            }
            (Some(Quote::AnsiC), '\\') => push_escaped(&mut out, c, &mut chars),
            (Some(Quote::Double), '\\') => {
                if !take_line_break(&mut chars) {
                    push_escaped(&mut out, c, &mut chars);
                }
            }
            (Some(_), _) => out.push(c),
            (None, '\\' | '^' | '`') if take_line_break(&mut chars) => out.push(' '),
            (None, '\\') => push_escaped(&mut out, c, &mut chars),
            (None, '\'') => {
                quote = Some(if was_dollar { Quote::AnsiC } else { Quote::Single });
                out.push(c);
            }
            (None, '"') => {
                quote = Some(Quote::Double);
                out.push(c);
            }
            (None, _) => {
                after_dollar = c == '$';
                out.push(c);
            }
        }
    }

    out
}

/// Consume a `\r?\n` if it comes next
fn take_line_break(chars: &mut Peekable<Chars<'_>>) -> bool {
    let mut lookahead = chars.clone();
    if lookahead.peek() == Some(&'\r') {
        lookahead.next();
    }
    if lookahead.next() == Some('\n') {
        *chars = lookahead;
        true
    } else {
        false
    }
}

fn push_escaped(out: &mut String, escape: char, chars: &mut Peekable<Chars<'_>>) {
    out.push(escape);
    if let Some(next) = chars.next() {
        out.push(next);
    }
}

/// Rewrite `$'...'` strings into equivalent double-quoted strings
fn rewrite_ansi_c_quotes(cmd: &str) -> String {
    let mut out = String::with_capacity(cmd.len());
    let mut chars = cmd.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' if !in_single => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '\'' if !in_double => {
                in_single = !in_single;
                out.push(c);
            }
            '"' if !in_single => {
                in_double = !in_double;
                out.push(c);
            }
            '$' if !in_single && !in_double && chars.peek() == Some(&'\'') => {
                chars.next();
                let decoded = decode_ansi_c(&mut chars);
                out.push('"');
                for d in decoded.chars() {
                    if matches!(d, '"' | '\\' | '$' | '`') {
                        out.push('\\');
                    }
                    out.push(d);
                }
                out.push('"');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Consume an ANSI-C quoted body up to its closing quote
fn decode_ansi_c(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut decoded = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\'' => break,
            '\\' => match chars.next() {
                Some('n') => decoded.push('\n'),
                Some('t') => decoded.push('\t'),
                Some('r') => decoded.push('\r'),
                Some('\\') => decoded.push('\\'),
                Some('\'') => decoded.push('\''),
                Some('"') => decoded.push('"'),
                Some(other) => {
                    decoded.push('\\');
                    decoded.push(other);
                }
                None => decoded.push('\\'),
            },
            _ => decoded.push(c),
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_program_token() {
        assert_eq!(preprocess_curl_command("curl https://example.com"), "https://example.com");
        assert_eq!(preprocess_curl_command("  CURL -X GET a.com "), "-X GET a.com");
        assert_eq!(preprocess_curl_command("curl"), "");
    }

    #[test]
    fn test_keeps_non_program_prefix() {
        assert_eq!(preprocess_curl_command("curlew.example.com"), "curlew.example.com");
        assert_eq!(preprocess_curl_command("-X POST a.com"), "-X POST a.com");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(preprocess_curl_command(""), "");
        assert_eq!(preprocess_curl_command("   \n "), "");
    }

    #[test]
    fn test_line_continuations() {
        let cmd = "curl https://example.com \\\n  -H 'Accept: */*' \\\r\n  -X POST";
        assert_eq!(
            preprocess_curl_command(cmd),
            "https://example.com    -H 'Accept: */*'    -X POST"
        );
        assert_eq!(preprocess_curl_command("curl a.com ^\n -X PUT"), "a.com   -X PUT");
    }

    #[test]
    fn test_quoted_continuation_markers_are_literal() {
        assert_eq!(
            preprocess_curl_command("curl -d '```\ncode\n```\nend' a.com"),
            "-d '```\ncode\n```\nend' a.com"
        );
        assert_eq!(preprocess_curl_command("curl -d 'line1\\\nline2'"), "-d 'line1\\\nline2'");
        assert_eq!(preprocess_curl_command("curl -d 'x^\ny' a.com"), "-d 'x^\ny' a.com");
    }

    #[test]
    fn test_continuation_after_quoted_text() {
        assert_eq!(
            preprocess_curl_command("curl -d 'a^' ^\n -X PUT"),
            "-d 'a^'   -X PUT"
        );
        assert_eq!(
            preprocess_curl_command("curl -d $'it\\'s' \\\n -X PUT"),
            "-d \"it's\"   -X PUT"
        );
    }

    #[test]
    fn test_double_quoted_backslash_newline_removed() {
        assert_eq!(preprocess_curl_command("curl -d \"ab\\\ncd\" a.com"), "-d \"abcd\" a.com");
        assert_eq!(preprocess_curl_command("curl -d \"a^\nb\" a.com"), "-d \"a^\nb\" a.com");
    }

    #[test]
    fn test_escaped_backslash_is_not_a_continuation() {
        assert_eq!(preprocess_curl_command("curl a.com\\\\\n"), "a.com\\\\");
    }

    #[test]
    fn test_typographic_quotes() {
        assert_eq!(
            preprocess_curl_command("curl -H \u{201C}Accept: text/plain\u{201D} a.com"),
            "-H \"Accept: text/plain\" a.com"
        );
    }

    #[test]
    fn test_ansi_c_quotes() {
        assert_eq!(
            preprocess_curl_command(r#"curl --data-binary $'{"a":"it\'s"}' a.com"#),
            r#"--data-binary "{\"a\":\"it's\"}" a.com"#
        );
        assert_eq!(preprocess_curl_command(r"curl -d $'line1\nline2'"), "-d \"line1\nline2\"");
    }

    #[test]
    fn test_dollar_inside_quotes_untouched() {
        assert_eq!(preprocess_curl_command(r#"curl -d "$'x'""#), r#"-d "$'x'""#);
        assert_eq!(preprocess_curl_command("curl -d '$'"), "-d '$'");
    }
}
