//! Main execution logic for the CLI

use std::io::{self, Read, Write};

use clap::Parser;
use tracing::{debug, warn};

use crate::cli::{Args, LogFormat, OutputFormat};
use crate::config::Config;
use crate::curl::{format_curl_pretty, parse_curl_command_with, to_curl_command};
use crate::errors::RestcurlError;
use crate::request::{RequestDefaults, RestRequest};
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Parses arguments, loads configuration, translates every command and
/// prints the results.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(parsed.log_format.unwrap_or_default(), parsed.debug);

    let config = match &parsed.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using built-in defaults: {}", e);
            Config::default()
        }
    };
    let defaults = config.request_defaults();

    match execute(&parsed, &defaults) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("restcurl: error: {}", e);
            ExitStatus::Error
        }
    }
}

fn execute(args: &Args, defaults: &RequestDefaults) -> Result<ExitStatus, RestcurlError> {
    let batch = args.batch.is_some();
    let commands = collect_commands(args)?;
    debug!(count = commands.len(), batch, "Translating curl commands");

    let mut status = ExitStatus::Success;
    let mut requests: Vec<RestRequest> = Vec::with_capacity(commands.len());

    for (index, command) in commands.iter().enumerate() {
        match parse_curl_command_with(command, defaults) {
            Ok(request) => requests.push(request),
            Err(e) => {
                eprintln!("restcurl: error: command {}: {}", index + 1, e);
                status = ExitStatus::Error;
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.output {
        OutputFormat::Json => {
            let rendered = match (batch, requests.as_slice()) {
                (false, [request]) => to_json(request, args.pretty)?,
                (false, []) => return Ok(status),
                _ => to_json(&requests, args.pretty)?,
            };
            writeln!(out, "{}", rendered)?;
        }
        OutputFormat::Curl => {
            let colored = atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none();
            for request in &requests {
                let cmd = to_curl_command(request);
                if colored {
                    writeln!(out, "{}", format_curl_pretty(&cmd))?;
                } else {
                    writeln!(out, "{}", cmd)?;
                }
            }
        }
    }

    Ok(status)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, RestcurlError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

/// Gather the commands to translate from the batch file, arguments or stdin
fn collect_commands(args: &Args) -> Result<Vec<String>, RestcurlError> {
    if let Some(path) = &args.batch {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RestcurlError::Argument(format!("Cannot read batch file {}: {}", path.display(), e))
        })?;
        return Ok(split_commands(&content));
    }

    if !args.command.is_empty() {
        return Ok(vec![args.command.join(" ")]);
    }

    if atty::is(atty::Stream::Stdin) {
        return Err(RestcurlError::Argument(
            "No curl command given (pass it as an argument or pipe it to stdin)".to_string(),
        ));
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(vec![input])
}

/// Split a batch file into individual commands
///
/// A command starts on a line whose first word is `curl`; following lines
/// belong to it (continuations, or multi-line quoted data). Blank lines and
/// `#` comments between commands are skipped.
pub fn split_commands(text: &str) -> Vec<String> {
    let mut commands: Vec<String> = Vec::new();
    let mut continues = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if !continues && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }

        let starts_new = !continues && is_program_line(trimmed);
        match commands.last_mut() {
            Some(current) if !starts_new => {
                current.push('\n');
                current.push_str(line);
            }
            _ => commands.push(line.to_string()),
        }

        continues = trimmed.ends_with(['\\', '^', '`']);
    }

    commands
}

fn is_program_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map(|word| word.eq_ignore_ascii_case("curl") || word.eq_ignore_ascii_case("curl.exe"))
        .unwrap_or(false)
}

/// Install the tracing subscriber; logs always go to stderr
fn init_logging(format: LogFormat, debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        EnvFilter::new("restcurl=debug")
    } else {
        EnvFilter::try_from_env("RESTCURL_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    // A subscriber may already be installed (tests); keep it
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_commands() {
        let text = "\
# exported from the browser
curl https://a.com/one

curl -X POST https://a.com/two \\
  -H 'Accept: */*'
curl https://a.com/three -d '{
  \"multi\": \"line\"
}'
";
        let commands = split_commands(text);
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], "curl https://a.com/one");
        assert!(commands[1].contains("Accept"));
        assert!(commands[2].ends_with("}'"));
    }

    #[test]
    fn test_split_commands_without_program_token() {
        let commands = split_commands("https://a.com -X PUT\n");
        assert_eq!(commands, vec!["https://a.com -X PUT"]);
    }

    #[test]
    fn test_split_commands_empty() {
        assert!(split_commands("\n# nothing here\n").is_empty());
    }

    #[test]
    fn test_is_program_line() {
        assert!(is_program_line("curl https://a.com"));
        assert!(is_program_line("CURL"));
        assert!(!is_program_line("curlew"));
        assert!(!is_program_line(""));
    }
}
