//! Integration tests for the modpanelctl binary
//!
//! These run the compiled CLI and never need a running server: each
//! command exercised either works offline or targets a closed port.

use std::process::{Command, Output};

fn modpanelctl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modpanelctl"))
        .args(args)
        .env_remove("MODPANEL_SERVER")
        .env_remove("MODPANEL_FORMAT")
        .env_remove("MODPANEL_VERBOSE")
        .env_remove("MODPANEL_TIMEOUT")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run modpanelctl")
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://{}", listener.local_addr().unwrap())
}

#[test]
fn test_completion_generates_script() {
    let output = modpanelctl(&["completion", "bash"]);

    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("modpanelctl"));
}

#[test]
fn test_config_path_honours_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cli.toml");
    let path_str = path.to_str().unwrap();

    let output = modpanelctl(&["--config", path_str, "config", "path"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), path_str);
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cli.toml");
    let path_str = path.to_str().unwrap();

    let output = modpanelctl(&[
        "--config",
        path_str,
        "--server",
        "http://192.168.1.20:8000",
        "config",
        "init",
    ]);
    assert!(output.status.success());
    assert!(path.exists());

    let output = modpanelctl(&["--config", path_str, "--format", "json", "config", "show"]);
    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["server_url"], "http://192.168.1.20:8000");
    assert_eq!(config["output_format"], "json");
}

#[test]
fn test_invalid_mode_fails_before_connecting() {
    let output = modpanelctl(&["--no-config", "-s", &closed_port_url(), "mode", "set", "fast"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Mode must be 'otomatis' or 'statis'"));
}

#[test]
fn test_health_reports_unreachable_server() {
    let output = modpanelctl(&[
        "--no-config",
        "-s",
        &closed_port_url(),
        "--format",
        "json",
        "health",
    ]);

    assert!(output.status.success());
    let health: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(health["connected"], false);
}

#[test]
fn test_invalid_server_url_is_configuration_error() {
    let output = modpanelctl(&["--no-config", "-s", "phone.local", "device"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("http://"));
}
