//! Common test utilities for restcurl integration tests
//!
//! - CLI invocation helpers
//! - Output parsing helpers
//! - Config fixture management

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::TempDir;

/// Exit status codes matching the Rust application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
}

impl CliResponse {
    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, self.stdout))
    }
}

/// Build a command for the restcurl binary with an isolated config
pub fn restcurl_cmd(config: &ConfigFixture) -> Command {
    let mut cmd = Command::cargo_bin("restcurl").expect("restcurl binary is built");
    cmd.env("RESTCURL_CONFIG", config.path())
        .env_remove("RESTCURL_LOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Run restcurl with the given arguments and no stdin
pub fn restcurl(args: &[&str]) -> CliResponse {
    let config = ConfigFixture::empty();
    run(restcurl_cmd(&config).args(args).write_stdin(""))
}

/// Run restcurl with the given arguments and stdin content
pub fn restcurl_with_stdin(args: &[&str], stdin: &str) -> CliResponse {
    let config = ConfigFixture::empty();
    run(restcurl_cmd(&config).args(args).write_stdin(stdin))
}

/// Run a prepared command and capture its output
pub fn run(cmd: &mut Command) -> CliResponse {
    let output = cmd.output().expect("failed to run restcurl");
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_status: ExitStatus::from(output.status.code().unwrap_or(1)),
    }
}

/// Temporary directory holding a config file
pub struct ConfigFixture {
    dir: TempDir,
}

impl ConfigFixture {
    /// Config path that does not exist, so built-in defaults apply
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    /// Config file with the given TOML content
    pub fn with_content(content: &str) -> Self {
        let fixture = Self::empty();
        let mut file = std::fs::File::create(fixture.path()).expect("create config");
        file.write_all(content.as_bytes()).expect("write config");
        fixture
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write an extra file next to the config and return its path
    pub fn write_file(&self, name: &str, content: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture file");
        path
    }
}
