#![allow(clippy::unwrap_used)]
// Smoke and end-to-end tests for the `zonedesk` binary.

use std::path::Path;
use std::process::Output;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// The binary with a scrubbed environment and a private config dir.
fn zonedesk(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zonedesk").unwrap();
    cmd.env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

fn ack() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true }))
}

async fn mock_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ack())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ack())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": 7, "Name": "example.com", "SOAEmail": "hostmaster@example.com", "Serial": 1 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/domains/7/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": 1, "DomainID": 7, "Type": "SOA", "Name": "", "Content": "ns1.example.com. hostmaster.example.com.", "Priority": null, "TTL": 3600 },
            { "ID": 2, "DomainID": 7, "Type": "NS", "Name": "", "Content": "ns1.example.com.", "Priority": null, "TTL": 3600 },
            { "ID": 3, "DomainID": 7, "Type": "MX", "Name": "", "Content": "mail.example.com.", "Priority": 10, "TTL": 3600 }
        ])))
        .mount(&server)
        .await;
    server
}

/// Run against `server` as alice, without blocking the mock's runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let home = TempDir::new().unwrap();
    let mut cmd = zonedesk(home.path());
    cmd.env("ZONEDESK_PASSWORD", "s3cret")
        .args(["--server", &server.uri(), "--user", "alice"])
        .args(args);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    drop(home);
    output
}

// ── Offline ─────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    zonedesk(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("zones"))
        .stdout(predicate::str::contains("records"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn no_arguments_is_usage_error() {
    let home = TempDir::new().unwrap();
    zonedesk(home.path()).assert().code(2);
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    zonedesk(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zonedesk"));
}

#[test]
fn config_show_prints_defaults_without_a_file() {
    let home = TempDir::new().unwrap();
    zonedesk(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"))
        .stdout(predicate::str::contains("output = \"table\""));
}

#[test]
fn config_use_unknown_profile_is_not_found() {
    let home = TempDir::new().unwrap();
    zonedesk(home.path())
        .args(["config", "use", "work"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("work"));
}

#[test]
fn server_command_without_config_is_usage_error() {
    let home = TempDir::new().unwrap();
    zonedesk(home.path())
        .args(["zones", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("zonedesk config init"));
}

// ── Against a server ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn zones_list_plain_prints_names() {
    let server = mock_server().await;
    let out = run_against(&server, &["-o", "plain", "zones", "list"]).await;

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "example.com");
}

#[tokio::test(flavor = "multi_thread")]
async fn records_list_renders_table() {
    let server = mock_server().await;
    let out = run_against(&server, &["records", "list", "example.com"]).await;

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("mail.example.com."));
    assert!(stdout.contains("locked"));
    assert!(stdout.contains(" @ "));

    // Signed out at the end of the session.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.last().unwrap().url.path(), "/api/logout");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_zone_exits_not_found() {
    let server = mock_server().await;
    let out = run_against(&server, &["records", "list", "nope.example"]).await;

    assert_eq!(out.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&out.stderr).contains("nope.example"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_without_confirmation_sends_nothing() {
    let server = mock_server().await;
    let out = run_against(&server, &["records", "delete", "example.com", "3"]).await;

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cancelled"));
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.as_str() != "DELETE"));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_login_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let out = run_against(&server, &["zones", "list"]).await;

    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid username or password"));
}
