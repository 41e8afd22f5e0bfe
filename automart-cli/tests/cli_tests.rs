//! Integration tests for the `automart` binary.

use std::time::Duration;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::PredicateBooleanExt;
use tempfile::TempDir;

/// Command isolated from the caller's environment and session.
fn automart(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("automart");
    cmd.current_dir(dir.path())
        .env("AUTOMART_SESSION_DIR", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("AUTOMART_API_BASE_URL")
        .env_remove("AUTOMART_LOG_LEVEL")
        .env_remove("AUTOMART_REQUEST_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

fn closed_api_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1")
}

#[test]
fn help_lists_marketplace_commands() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("login"))
        .stdout(predicates::str::contains("cars"))
        .stdout(predicates::str::contains("admin"))
        .stdout(predicates::str::contains("--api-url"));
}

#[test]
fn cars_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["cars", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("list"))
        .stdout(predicates::str::contains("mine"))
        .stdout(predicates::str::contains("edit"));
}

#[test]
fn guarded_command_without_session_points_to_login() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["cars", "mine", "--api-url", &closed_api_url()])
        .assert()
        .failure()
        .stderr(predicates::str::contains("automart login"))
        .stderr(predicates::str::contains("Failed to load your listings").not());
}

#[test]
fn admin_command_without_session_points_to_login() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["admin", "cars", "--api-url", &closed_api_url()])
        .assert()
        .failure()
        .stderr(predicates::str::contains("automart login"));
}

#[test]
fn unreachable_api_shows_fixed_message() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["cars", "list", "--api-url", &closed_api_url()])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to load cars"));
}

#[test]
fn show_requires_an_id() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["cars", "show"])
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "the following required arguments were not provided",
        ));
}

#[test]
fn non_http_api_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["cars", "list", "--api-url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to load configuration"));
}

#[test]
fn config_writes_toml_defaults() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["config", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicates::str::contains("config.toml"));

    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("api_base_url = \"http://localhost:5000/api/v1\""));
}

#[test]
fn config_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["config", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));
}

#[test]
fn completion_script_names_the_binary() {
    let dir = TempDir::new().unwrap();
    automart(&dir)
        .args(["completion", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicates::str::contains("automart"));
}
