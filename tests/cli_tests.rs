//! Integration tests for the modlens CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn modlens_cmd() -> Command {
    Command::cargo_bin("modlens").unwrap()
}

const SAMPLE: &str = "def helper(x):\n    return x + 1\n\n\ndef main():\n    return helper(2)\n";

#[test]
fn test_cli_help() {
    modlens_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("mcp-stdio"));
}

#[test]
fn test_analyze_json_to_stdout() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.py");
    fs::write(&file, SAMPLE).unwrap();

    let output = modlens_cmd()
        .args(["analyze", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["file_name"], "sample.py");
    assert_eq!(report["total_functions"], 2);
    assert_eq!(report["total_issues"], 0);
}

#[test]
fn test_analyze_reads_stdin() {
    modlens_cmd()
        .args(["analyze", "--format", "yaml", "-"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("file_path: <stdin>"))
        .stdout(predicate::str::contains("total_functions: 2"));
}

#[test]
fn test_analyze_text_summary() {
    modlens_cmd()
        .args(["analyze", "--format", "text", "-"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE MODULARITY ANALYSIS SUMMARY"))
        .stdout(predicate::str::contains("Called by 1 function(s): main"));
}

#[test]
fn test_analyze_writes_output_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.py");
    let out = dir.path().join("reports/sample.json");
    fs::write(&file, SAMPLE).unwrap();

    modlens_cmd()
        .args(["analyze", "--format", "json", "--out"])
        .arg(&out)
        .arg(&file)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"total_functions\": 2"));
}

#[test]
fn test_analyze_syntax_error_fails() {
    modlens_cmd()
        .args(["analyze", "--format", "json", "-"])
        .write_stdin("def broken(:\n    pass\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_analyze_missing_file_fails() {
    modlens_cmd()
        .args(["analyze", "/definitely/not/here.py"])
        .assert()
        .failure();
}

#[test]
fn test_print_default_config_roundtrips() {
    let output = modlens_cmd().arg("print-default-config").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("duplicate_threshold: 0.7"));
    assert!(stdout.contains("max_sloc: 500"));
}

#[test]
fn test_validate_config() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.yml");
    let bad = dir.path().join("bad.yml");
    fs::write(&good, "thresholds:\n  max_functions: 30\n").unwrap();
    fs::write(&bad, "similarity:\n  duplicate_threshold: 0.95\n  high_similarity_threshold: 0.9\n").unwrap();

    modlens_cmd()
        .args(["validate-config", "--config"])
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));

    modlens_cmd()
        .args(["validate-config", "--config"])
        .arg(&bad)
        .assert()
        .failure();
}

#[test]
fn test_mcp_stdio_round_trip() {
    let requests = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"analyze_code","arguments":{"code":""}}}"#,
    ]
    .join("\n")
        + "\n";

    let output = modlens_cmd()
        .arg("mcp-stdio")
        .write_stdin(requests)
        .output()
        .unwrap();
    assert!(output.status.success());

    let responses: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "modlens");
    assert_eq!(responses[1]["error"]["code"], -32602);
}
