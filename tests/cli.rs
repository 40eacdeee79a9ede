//! Command-line behaviour of the `yaviq` binary

use assert_cmd::Command;
use predicates::prelude::*;

fn yaviq() -> Command {
    let mut cmd = Command::cargo_bin("yaviq").unwrap();
    cmd.env_remove("YAVIQ_ENDPOINT")
        .env_remove("TOKENOPT_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_key_exits_with_error() {
    yaviq()
        .args(["optimize", "--input", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--key"));
}

#[test]
fn missing_input_names_the_argument() {
    yaviq()
        .args(["optimize", "--key", "k"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn unknown_command_fails() {
    yaviq()
        .args(["shrink", "--key", "k", "--input", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: shrink"));
}

#[test]
fn bad_flag_exits_one() {
    yaviq().args(["optimize", "--bogus"]).assert().code(1);
}

#[test]
fn help_lists_aliases() {
    yaviq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert-to-toon"));
}

#[test]
fn optimize_prints_unwrapped_payload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/optimize")
        .match_header("authorization", "Bearer k")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "input": "some long text",
            "mode": "aggressive"
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"optimized":"text","tokensSaved":2,"compression":50}}"#)
        .create();

    let output = yaviq()
        .args(["optimize", "--key", "k", "--input", "some long text", "--mode", "high"])
        .args(["--endpoint", &server.url()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let printed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        printed,
        serde_json::json!({"optimized": "text", "tokensSaved": 2, "compression": 50})
    );
    mock.assert();
}

#[test]
fn legacy_alias_reads_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.toon");
    std::fs::write(&path, "users[1]{id}:\n  7").unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/convert-from-toon")
        .match_body(mockito::Matcher::Json(
            serde_json::json!({"toon": "users[1]{id}:\n  7"}),
        ))
        .with_status(200)
        .with_body(r#"{"json":{"users":[{"id":7}]}}"#)
        .create();

    yaviq()
        .args(["convert-from-compressed", "--key", "k"])
        .arg("--input-file")
        .arg(&path)
        .args(["--endpoint", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"users\""));
    mock.assert();
}

#[test]
fn legacy_endpoint_variable_is_honoured() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/convert-to-toon")
        .with_status(200)
        .with_body(r#"{"toon":"a: 1","format":"json"}"#)
        .create();

    yaviq()
        .args(["convert-to-toon", "--key", "k", "--input", r#"{"a":1}"#])
        .env("TOKENOPT_ENDPOINT", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("a: 1"));
    mock.assert();
}

#[test]
fn backend_error_exits_one() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/optimize")
        .with_status(401)
        .with_body(r#"{"error":"invalid api key"}"#)
        .create();

    yaviq()
        .args(["optimize", "--key", "bad", "--input", "hello"])
        .args(["--endpoint", &server.url()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Request failed (401): invalid api key"));
}

#[test]
fn unreachable_endpoint_exits_one() {
    yaviq()
        .args(["optimize", "--key", "k", "--input", "hello"])
        .args(["--endpoint", "http://127.0.0.1:1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Network error"));
}

#[cfg(target_os = "linux")]
#[test]
fn malformed_config_file_is_skipped() {
    let config_home = tempfile::tempdir().unwrap();
    let config_dir = config_home.path().join("yaviq");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "mode = [unterminated").unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/optimize")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "mode": "balanced",
            "format": "auto"
        })))
        .with_status(200)
        .with_body(r#"{"optimized":"hi","tokensSaved":0,"compression":0}"#)
        .create();

    yaviq()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["optimize", "--key", "k", "--input", "hi"])
        .args(["--endpoint", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"optimized\": \"hi\""));
    mock.assert();
}
