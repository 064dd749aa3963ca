//! Tokenizer and flag map
//!
//! Splits a preprocessed command line into argv-style tokens and folds
//! them into a [`FlagMap`] keyed by canonical flag name. Short and long
//! aliases collapse to one key through a table built once on first use.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// `-X` / `--request`
pub const REQUEST: &str = "X";
/// `-H` / `--header`
pub const HEADER: &str = "H";
/// `-d` and its `--data*` siblings
pub const DATA: &str = "d";
/// `-F` / `--form`
pub const FORM: &str = "F";
/// `--form-string`
pub const FORM_STRING: &str = "form-string";
/// `-G` / `--get`
pub const GET: &str = "G";
/// `-u` / `--user`
pub const USER: &str = "u";
/// `--oauth2-bearer`
pub const OAUTH2_BEARER: &str = "oauth2-bearer";
/// `-I` / `--head`
pub const HEAD: &str = "I";
/// `-A` / `--user-agent`
pub const USER_AGENT: &str = "A";
/// `-e` / `--referer`
pub const REFERER: &str = "e";
/// `-b` / `--cookie`
pub const COOKIE: &str = "b";
/// `--url`
pub const URL: &str = "url";
/// `-T` / `--upload-file`
pub const UPLOAD_FILE: &str = "T";
/// `--basic`
pub const BASIC: &str = "basic";
/// `--digest`
pub const DIGEST: &str = "digest";

/// How a flag consumes values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    /// Presence only
    Switch,
    /// Takes a value, last occurrence wins
    Single,
    /// Takes a value, every occurrence kept in order
    Repeated,
    /// Takes a value that the translator has no use for
    Discard,
}

/// Value rewrite applied while folding a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rewrite {
    None,
    /// `--data-urlencode` content encoding
    UrlEncode,
}

#[derive(Debug, Clone, Copy)]
struct FlagSpec {
    canonical: &'static str,
    arity: Arity,
    rewrite: Rewrite,
}

/// Alias table: every spelling of a recognized flag
static FLAG_ALIASES: Lazy<HashMap<&'static str, FlagSpec>> = Lazy::new(|| {
    let table: &[(&[&str], &'static str, Arity, Rewrite)] = &[
        (&["-X", "--request"], REQUEST, Arity::Single, Rewrite::None),
        (&["-H", "--header"], HEADER, Arity::Repeated, Rewrite::None),
        (
            &["-d", "--data", "--data-ascii", "--data-raw", "--data-binary"],
            DATA,
            Arity::Repeated,
            Rewrite::None,
        ),
        (&["--data-urlencode"], DATA, Arity::Repeated, Rewrite::UrlEncode),
        (&["-F", "--form"], FORM, Arity::Repeated, Rewrite::None),
        (&["--form-string"], FORM_STRING, Arity::Repeated, Rewrite::None),
        (&["-G", "--get"], GET, Arity::Switch, Rewrite::None),
        (&["-u", "--user"], USER, Arity::Single, Rewrite::None),
        (&["--oauth2-bearer"], OAUTH2_BEARER, Arity::Single, Rewrite::None),
        (&["-I", "--head"], HEAD, Arity::Switch, Rewrite::None),
        (&["-A", "--user-agent"], USER_AGENT, Arity::Single, Rewrite::None),
        (&["-e", "--referer"], REFERER, Arity::Single, Rewrite::None),
        (&["-b", "--cookie"], COOKIE, Arity::Repeated, Rewrite::None),
        (&["--url"], URL, Arity::Single, Rewrite::None),
        (&["-T", "--upload-file"], UPLOAD_FILE, Arity::Single, Rewrite::None),
        (&["--basic"], BASIC, Arity::Switch, Rewrite::None),
        (&["--digest"], DIGEST, Arity::Switch, Rewrite::None),
        // Value-taking flags outside the request model
        (
            &[
                "-o", "--output", "-m", "--max-time", "--connect-timeout", "-x", "--proxy",
                "-U", "--proxy-user", "--cacert", "--capath", "-E", "--cert", "--key",
                "--cert-type", "--key-type", "--max-redirs", "-w", "--write-out", "-r",
                "--range", "-c", "--cookie-jar", "-K", "--config", "--retry", "--retry-delay",
                "--retry-max-time", "--resolve", "--connect-to", "-D", "--dump-header",
                "--limit-rate", "--interface", "--unix-socket", "--abstract-unix-socket",
                "--ciphers", "-Q", "--quote", "-P", "--ftp-port", "-t", "--telnet-option",
                "-y", "--speed-time", "-Y", "--speed-limit", "-z", "--time-cond", "-C",
                "--continue-at", "--trace", "--trace-ascii", "--stderr", "--netrc-file",
                "--noproxy", "--pinnedpubkey", "--proto", "--proto-redir", "--local-port",
                "--expect100-timeout", "--keepalive-time", "--dns-servers", "--preproxy",
            ],
            "",
            Arity::Discard,
            Rewrite::None,
        ),
    ];

    let mut aliases = HashMap::new();
    for (spellings, canonical, arity, rewrite) in table {
        for spelling in spellings.iter() {
            aliases.insert(
                *spelling,
                FlagSpec {
                    canonical,
                    arity: *arity,
                    rewrite: *rewrite,
                },
            );
        }
    }
    aliases
});

/// Value recorded for one canonical flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Presence-only flag
    Bool(bool),
    /// Single-valued flag (last occurrence)
    Single(String),
    /// Repeatable flag, always a list even for one occurrence
    List(Vec<String>),
}

/// Canonical flag name to value(s), plus positional arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagMap {
    flags: IndexMap<String, FlagValue>,
    positionals: Vec<String>,
}

impl FlagMap {
    /// Tokenize a preprocessed command line and fold it into a flag map
    pub fn parse(cmd: &str) -> Self {
        Self::from_tokens(&tokenize_curl(cmd))
    }

    /// Fold already split tokens into a flag map
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut map = FlagMap::default();
        let mut i = 0;
        let mut options_done = false;

        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            if options_done || token == "-" || !token.starts_with('-') {
                map.positionals.push(token.clone());
                continue;
            }

            if token == "--" {
                options_done = true;
                continue;
            }

            if let Some(long) = token.strip_prefix("--") {
                let (name, inline) = match long.split_once('=') {
                    Some((name, value)) => (format!("--{}", name), Some(value.to_string())),
                    None => (token.clone(), None),
                };

                match FLAG_ALIASES.get(name.as_str()) {
                    Some(spec) if spec.arity == Arity::Switch => map.set_switch(spec.canonical),
                    Some(spec) => {
                        let value = inline.or_else(|| next_value(tokens, &mut i));
                        if let Some(value) = value {
                            map.record(spec, value);
                        }
                    }
                    None => map.set_switch(name.trim_start_matches('-')),
                }
                continue;
            }

            // Short flag cluster such as -sSL, -XPOST or -sd@file
            let cluster: Vec<char> = token[1..].chars().collect();
            for (pos, c) in cluster.iter().enumerate() {
                let alias = format!("-{}", c);
                match FLAG_ALIASES.get(alias.as_str()) {
                    Some(spec) if spec.arity == Arity::Switch => map.set_switch(spec.canonical),
                    Some(spec) => {
                        let attached: String = cluster[pos + 1..].iter().collect();
                        let value = if attached.is_empty() {
                            next_value(tokens, &mut i)
                        } else {
                            Some(attached)
                        };
                        if let Some(value) = value {
                            map.record(spec, value);
                        }
                        break;
                    }
                    None => map.set_switch(&c.to_string()),
                }
            }
        }

        map
    }

    fn set_switch(&mut self, key: &str) {
        self.flags.insert(key.to_string(), FlagValue::Bool(true));
    }

    fn record(&mut self, spec: &FlagSpec, value: String) {
        let value = match spec.rewrite {
            Rewrite::None => value,
            Rewrite::UrlEncode => encode_data_urlencode(&value),
        };

        match spec.arity {
            Arity::Single => {
                self.flags.insert(spec.canonical.to_string(), FlagValue::Single(value));
            }
            Arity::Repeated => {
                let entry = self
                    .flags
                    .entry(spec.canonical.to_string())
                    .or_insert_with(|| FlagValue::List(Vec::new()));
                if let FlagValue::List(values) = entry {
                    values.push(value);
                }
            }
            Arity::Switch | Arity::Discard => {}
        }
    }

    /// Raw value for a canonical key
    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Whether a flag occurred at all
    pub fn is_set(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    /// Value of a single-valued flag
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.flags.get(key) {
            Some(FlagValue::Single(value)) => Some(value.as_str()),
            Some(FlagValue::List(values)) => values.last().map(String::as_str),
            _ => None,
        }
    }

    /// Values of a repeatable flag, empty when absent
    pub fn list(&self, key: &str) -> &[String] {
        match self.flags.get(key) {
            Some(FlagValue::List(values)) => values,
            Some(FlagValue::Single(value)) => std::slice::from_ref(value),
            _ => &[],
        }
    }

    /// Positional (non-flag) arguments in order
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

fn next_value(tokens: &[String], i: &mut usize) -> Option<String> {
    let value = tokens.get(*i).cloned();
    if value.is_some() {
        *i += 1;
    }
    value
}

/// Apply curl's `--data-urlencode` content rules
///
/// `content` and `=content` encode everything, `name=content` encodes the
/// content only, and the `@file` forms are kept as written since files are
/// never read.
fn encode_data_urlencode(value: &str) -> String {
    match value.find(['=', '@']) {
        Some(pos) if value[pos..].starts_with('=') => {
            let (name, content) = (&value[..pos], &value[pos + 1..]);
            if name.is_empty() {
                urlencoding::encode(content).into_owned()
            } else {
                format!("{}={}", name, urlencoding::encode(content))
            }
        }
        Some(_) => value.to_string(),
        None => urlencoding::encode(value).into_owned(),
    }
}

/// Split a command into tokens, honoring quotes and escapes
///
/// Unterminated quotes never fail: whatever was collected becomes the
/// final token.
pub fn tokenize_curl(cmd: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut chars = cmd.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_double_quote => match chars.peek() {
                Some(&next) if matches!(next, '"' | '\\' | '$' | '`') => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push(c),
            },
            '\\' if !in_single_quote => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                has_token = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                has_token = true;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                has_token = true;
            }
            ' ' | '\t' | '\n' | '\r' if !in_single_quote && !in_double_quote => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            _ => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        tokens.push(current);
    }

    tokens
}
