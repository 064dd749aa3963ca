//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for restcurl.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// restcurl - Translate curl commands into typed REST requests
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "restcurl", version, about, long_about = None)]
#[command(after_help = "Quote the command or put it after `--`:\n  restcurl \"curl -X POST https://api.example.com -d 'a=1'\"\n  restcurl -- curl -X POST https://api.example.com -d a=1")]
pub struct Args {
    // =========================================================================
    // INPUT
    // =========================================================================

    /// curl command to translate; words are joined with spaces.
    /// Read from stdin when omitted
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// File holding several curl commands, each starting on a `curl` line
    #[arg(short = 'b', long = "batch", value_name = "FILE", conflicts_with = "command")]
    pub batch: Option<PathBuf>,

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Output format
    #[arg(short = 'o', long = "output", value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Indent JSON output
    #[arg(short = 'p', long = "pretty", action = ArgAction::SetTrue)]
    pub pretty: bool,

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Config file overriding the default request template
    #[arg(short = 'c', long = "config", value_name = "PATH", env = "RESTCURL_CONFIG")]
    pub config: Option<PathBuf>,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Log output format (logs go to stderr)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Enable debug logging
    #[arg(long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
}

/// How translated requests are printed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Typed request as JSON
    #[default]
    Json,
    /// Normalized curl command
    Curl,
}

/// Log output format
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
