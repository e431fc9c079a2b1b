//! CLI integration tests
//!
//! These run the real binary with assert_cmd. Each test gets its own empty
//! working directory and a scrubbed environment, so configuration comes only
//! from what the test sets.

use std::process::{Child, Stdio};
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

use burr_counter::BurrCounterConfig;

const BIN: &str = env!("CARGO_BIN_EXE_burr-counter");

fn scrub_env(cmd: &mut std::process::Command) {
    for (key, _) in std::env::vars() {
        if key.starts_with("BURR_COUNTER") {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("PORT").env_remove("RUST_LOG");
}

fn burr_counter(dir: &TempDir) -> Command {
    let mut std_cmd = std::process::Command::new(BIN);
    std_cmd.current_dir(dir.path());
    scrub_env(&mut std_cmd);
    Command::from_std(std_cmd)
}

fn effective_config(cmd: &mut Command) -> BurrCounterConfig {
    let output = cmd.arg("config").assert().success().get_output().stdout.clone();
    toml::from_str(&String::from_utf8(output).unwrap()).unwrap()
}

#[test]
fn test_run_prints_only_the_json_payload_on_stdout() {
    let dir = TempDir::new().unwrap();

    let output = burr_counter(&dir)
        .args(["run", "-n", "3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["final_counter_value"], 3);
    assert_eq!(payload["limit"], 3);
    assert_eq!(payload["message"], "Execution successful.");
    assert_eq!(payload["burr_state"]["__PRIOR_STEP"], "result");
}

#[test]
fn test_run_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();

    burr_counter(&dir)
        .args(["run", "--number", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Counter workflow succeeded"))
        .stdout(predicate::str::contains("Counter workflow succeeded").not());
}

#[test]
fn test_run_rejects_non_positive_numbers() {
    let dir = TempDir::new().unwrap();

    for number in ["0", "-5"] {
        burr_counter(&dir)
            .args(["run", "-n", number])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Number must be a positive integer."));
    }
}

#[test]
fn test_run_requires_an_integer() {
    let dir = TempDir::new().unwrap();

    burr_counter(&dir)
        .args(["run", "-n", "five"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_config_defaults() {
    let dir = TempDir::new().unwrap();

    assert_eq!(
        effective_config(&mut burr_counter(&dir)),
        BurrCounterConfig::default()
    );
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("burr-counter.toml"),
        "[server]\nport = 8123\n\n[app]\ntitle = \"From File\"\n",
    )
    .unwrap();

    let config = effective_config(&mut burr_counter(&dir));

    assert_eq!(config.server.port, 8123);
    assert_eq!(config.app.title, "From File");
    // untouched sections keep their defaults
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_nested_environment_variables_override_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("burr-counter.toml"), "[server]\nport = 8123\n").unwrap();

    let config = effective_config(
        burr_counter(&dir)
            .env("BURR_COUNTER__SERVER__PORT", "9001")
            .env("BURR_COUNTER__APP__TITLE", "Counter Service")
            .env("BURR_COUNTER__OBSERVABILITY__JSON_LOGS", "false"),
    );

    assert_eq!(config.server.port, 9001);
    assert_eq!(config.app.title, "Counter Service");
    assert!(!config.observability.json_logs);
}

#[test]
fn test_plain_port_wins_over_prefixed_port() {
    let dir = TempDir::new().unwrap();

    let config = effective_config(
        burr_counter(&dir)
            .env("BURR_COUNTER__SERVER__PORT", "9001")
            .env("PORT", "7000"),
    );

    assert_eq!(config.server.port, 7000);
}

#[test]
fn test_invalid_port_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();

    burr_counter(&dir)
        .env("PORT", "abc")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid PORT value 'abc'"));
}

// Kills the server even when an assertion fails
struct ServerProcess(Child);

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::test]
async fn test_serve_binds_the_requested_host_and_port() {
    let dir = TempDir::new().unwrap();
    let port = free_port();

    let mut cmd = std::process::Command::new(BIN);
    cmd.current_dir(dir.path())
        .args(["serve", "--host", "127.0.0.1", "--port", &port.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    scrub_env(&mut cmd);
    let _server = ServerProcess(cmd.spawn().unwrap());

    let base = format!("http://127.0.0.1:{port}");
    let client = reqwest::Client::new();

    let mut health = None;
    for _ in 0..100 {
        if let Ok(response) = client.get(format!("{base}/")).send().await {
            health = Some(response);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let health = health.expect("server never came up");
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    let body: Value = health.json().await.unwrap();
    assert_eq!(body["status"], "running");

    let response = client
        .post(format!("{base}/run"))
        .json(&json!({"number": 6}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["final_counter_value"], 6);
}
