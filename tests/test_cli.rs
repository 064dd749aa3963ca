//! CLI integration tests
mod common;

use predicates::prelude::*;

use common::{restcurl, restcurl_cmd, restcurl_with_stdin, run, ConfigFixture, ExitStatus};

// ============================================================================
// Input Tests
// ============================================================================

#[test]
fn test_quoted_command_prints_json() {
    let r = restcurl(&["curl -X POST https://api.example.com/items -d 'a=1'"]);
    assert_eq!(r.exit_status, ExitStatus::Success);

    let json = r.json();
    assert_eq!(json["v"], "1");
    assert_eq!(json["method"], "POST");
    assert_eq!(json["endpoint"], "https://api.example.com/items");
    assert_eq!(json["body"]["kind"], "text");
    assert_eq!(json["body"]["content"], "a=1");
    assert_eq!(json["auth"]["authType"], "none");
}

#[test]
fn test_trailing_words_after_double_dash() {
    let r = restcurl(&["--", "curl", "-u", "alice:secret", "https://example.com"]);
    assert_eq!(r.exit_status, ExitStatus::Success);

    let json = r.json();
    assert_eq!(json["auth"]["authType"], "basic");
    assert_eq!(json["auth"]["username"], "alice");
    assert_eq!(json["auth"]["password"], "secret");
}

#[test]
fn test_command_from_stdin() {
    let r = restcurl_with_stdin(
        &[],
        "curl 'https://example.com/search?q=rust' \\\n  -H 'Accept: application/json'\n",
    );
    assert_eq!(r.exit_status, ExitStatus::Success);

    let json = r.json();
    assert_eq!(json["method"], "GET");
    assert_eq!(json["params"][0]["key"], "q");
    assert_eq!(json["params"][0]["value"], "rust");
    assert_eq!(json["headers"][0]["key"], "Accept");
}

#[test]
fn test_pretty_output_is_indented() {
    let r = restcurl(&["--pretty", "curl https://example.com"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.stdout.contains("\n  \"v\": \"1\""));
}

// ============================================================================
// Batch Tests
// ============================================================================

#[test]
fn test_batch_file_prints_array() {
    let fixture = ConfigFixture::empty();
    let batch = fixture.write_file(
        "commands.txt",
        "# first\ncurl https://a.com/one\n\ncurl -X DELETE https://a.com/two \\\n  -H 'X-Id: 2'\n",
    );

    let r = run(restcurl_cmd(&fixture).arg("--batch").arg(&batch));
    assert_eq!(r.exit_status, ExitStatus::Success);

    let json = r.json();
    let items = json.as_array().expect("batch output is an array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["endpoint"], "https://a.com/one");
    assert_eq!(items[1]["method"], "DELETE");
    assert_eq!(items[1]["headers"][0]["value"], "2");
}

#[test]
fn test_batch_invalid_method_falls_back() {
    let fixture = ConfigFixture::empty();
    let batch = fixture.write_file(
        "commands.txt",
        "curl -X 'GE T' https://a.com/bad -d a=1\ncurl https://a.com/good\n",
    );

    let r = run(restcurl_cmd(&fixture).arg("--batch").arg(&batch));
    assert_eq!(r.exit_status, ExitStatus::Success);

    let json = r.json();
    let items = json.as_array().expect("batch output is an array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["method"], "POST");
    assert_eq!(items[1]["endpoint"], "https://a.com/good");
}

#[test]
fn test_missing_batch_file() {
    let fixture = ConfigFixture::empty();
    restcurl_cmd(&fixture)
        .args(["--batch", "/nonexistent/restcurl/commands.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read batch file"));
}

// ============================================================================
// Output Format Tests
// ============================================================================

#[test]
fn test_curl_output_format() {
    let r = restcurl(&["--output", "curl", "--", "curl", "https://a.com/x", "-d", "a=1", "-X", "PUT"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert!(r.stdout.starts_with("curl"));
    assert!(r.stdout.contains("-X PUT"));
    assert!(r.stdout.contains("https://a.com/x"));
    assert!(!r.stdout.contains("\x1b["));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_overrides_request_name() {
    let fixture = ConfigFixture::with_content(
        r#"
[defaults]
name = "Imported"

[defaults.headers]
X-Team = "core"
"#,
    );

    let r = run(restcurl_cmd(&fixture).arg("curl https://example.com").write_stdin(""));
    assert_eq!(r.exit_status, ExitStatus::Success);

    let json = r.json();
    assert_eq!(json["name"], "Imported");
    assert_eq!(json["headers"][0]["key"], "X-Team");
    assert_eq!(json["headers"][0]["value"], "core");
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let fixture = ConfigFixture::with_content("[defaults\nname = ");

    let r = run(restcurl_cmd(&fixture).arg("curl https://example.com").write_stdin(""));
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert_eq!(r.json()["name"], "Untitled");
    assert!(r.stderr.contains("Failed to load config"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_invalid_method_falls_back_to_get() {
    let r = restcurl(&["curl -X 'GE T' https://example.com"]);
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert_eq!(r.json()["method"], "GET");
    assert!(r.stderr.contains("Ignoring invalid request method"));
}

#[test]
fn test_invalid_config_method_falls_back() {
    let fixture = ConfigFixture::with_content("[defaults]\nmethod = \"NOT VALID\"\n");

    let r = run(restcurl_cmd(&fixture).arg("curl https://example.com").write_stdin(""));
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert_eq!(r.json()["method"], "GET");
}

#[test]
fn test_quoted_multiline_body_kept_verbatim() {
    let r = restcurl_with_stdin(&[], "curl https://a.com/notes \\\n  -d '```\ncode\n```\nend'\n");
    assert_eq!(r.exit_status, ExitStatus::Success);
    assert_eq!(r.json()["body"]["content"], "```\ncode\n```\nend");
}

#[test]
fn test_help() {
    let fixture = ConfigFixture::empty();
    restcurl_cmd(&fixture)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--batch"));
}
