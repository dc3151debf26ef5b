//! Integration tests for argument parsing, help and shared test helpers.

#![allow(clippy::expect_used, dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with colors off, default logging and no inherited config location.
pub fn eshost() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("eshost"));
    cmd.env("NO_COLOR", "1")
        .env_remove("ESHOST_CONFIG")
        .env_remove("ESHOST_YES")
        .env_remove("CI")
        .env_remove("ESHOST_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// A scratch directory holding a config file for one test.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("eshost.json")
    }

    pub fn write_config(&self, json: &str) {
        std::fs::write(self.config_path(), json).expect("write config");
    }

    pub fn read_config(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.config_path()).expect("read config");
        serde_json::from_str(&content).expect("valid json")
    }

    /// `eshost --config <sandbox config>`.
    pub fn eshost(&self) -> Command {
        let mut cmd = eshost();
        cmd.arg("--config").arg(self.config_path());
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Write an executable shell script standing in for an engine.
    #[cfg(unix)]
    pub fn fake_engine(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write engine");
        let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod");
        path
    }

    /// Register hosts directly in the config file: `(name, type, path)`.
    pub fn register(&self, hosts: &[(&str, &str, &Path)]) {
        let mut map = serde_json::Map::new();
        for (name, host_type, path) in hosts {
            map.insert(
                (*name).to_string(),
                serde_json::json!({ "type": host_type, "path": path }),
            );
        }
        let doc = serde_json::json!({ "hosts": map });
        self.write_config(&doc.to_string());
    }
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    eshost()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_help_flag_shows_help() {
    eshost()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host-group"))
        .stdout(predicate::str::contains("--unanimous"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    eshost()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eshost"));
}

#[test]
fn test_cli_no_color_env_accepts_any_value() {
    let sandbox = Sandbox::new();
    for value in ["1", "yes", ""] {
        sandbox
            .eshost()
            .env("NO_COLOR", value)
            .arg("--list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configured hosts"));
    }
}

#[test]
fn test_cli_no_args_with_no_color_env_still_shows_help() {
    eshost()
        .env("NO_COLOR", "1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_unknown_flag_exits_2() {
    eshost().arg("--bogus").assert().code(2);
}

#[test]
fn test_cli_selection_without_input_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .eshost()
        .args(["-h", "d8"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: nothing to evaluate"));
}

#[test]
fn test_cli_missing_file_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .eshost()
        .arg("does-not-exist.js")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read does-not-exist.js"));
}

#[test]
fn test_cli_malformed_config_is_fatal() {
    let sandbox = Sandbox::new();
    sandbox.write_config("{ not json");
    sandbox
        .eshost()
        .args(["-e", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot parse"));
}

#[test]
fn test_cli_config_env_var_is_used() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"hosts":{"envhost":{"type":"d8","path":"/x/d8"}}}"#);
    eshost()
        .env("ESHOST_CONFIG", sandbox.config_path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("envhost"));
}
