//! CLI integration tests.
//!
//! These exercise argument parsing, tool inspection and configuration
//! output. None of them reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A conveyor command isolated from the user's config and environment.
fn conveyor(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("conveyor").unwrap();
    cmd.current_dir(config_dir.path())
        .env("CONVEYOR_CONFIG_DIR", config_dir.path())
        .env_remove("CONVEYOR_API_TOKEN")
        .env_remove("CONVEYOR_ZONE")
        .env_remove("CONVEYOR_API_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("call"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_tools_list_json() {
    let dir = TempDir::new().unwrap();
    let output = conveyor(&dir)
        .args(["--json", "tools", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tools: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert!(names.contains(&"scenarios_list"));
    assert!(names.contains(&"sdk_functions_get_code"));
}

#[test]
fn test_tools_list_category() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .args(["tools", "list", "--category", "folders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folders_create"))
        .stdout(predicate::str::contains("scenarios_list").not());
}

#[test]
fn test_tools_list_unknown_category() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .args(["tools", "list", "--category", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_tools_describe() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .args(["tools", "describe", "scenarios_delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("destructive"))
        .stdout(predicate::str::contains("scenarioId"));
}

#[test]
fn test_call_unknown_tool() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .args(["call", "no_such_tool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_call_without_token() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .args(["--zone", "eu1.example.com", "call", "users_me"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API token not found"));
}

#[test]
fn test_call_rejects_bad_args() {
    let dir = TempDir::new().unwrap();
    conveyor(&dir)
        .args(["call", "users_me", "--args", "[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_config_show_reads_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "zone = \"eu1.example.com\"\ntoken_env = \"TEST_CONVEYOR_TOKEN\"\n",
    )
    .unwrap();

    let output = conveyor(&dir)
        .env("TEST_CONVEYOR_TOKEN", "a1b2c3d4-e5f6-7890-abcd-ef1234567890")
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let shown: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(shown["zone"], "eu1.example.com");
    assert_eq!(shown["token_source"], "env var TEST_CONVEYOR_TOKEN");
    assert_eq!(shown["retry"]["retry_on_429"], false);
    assert!(!String::from_utf8_lossy(&output).contains("a1b2c3d4"));
}
