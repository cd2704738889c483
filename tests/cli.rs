//! Tests for the `dbg-attach` binary.

use dbg_attach::config::profile;
use serde_json::{json, Value};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_dbg-attach");

/// Temporary directory removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("dbg-attach-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }

    fn write(&self, name: &str, data: &str) -> PathBuf {
        let path = self.0.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, data).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        _ = fs::remove_dir_all(&self.0);
    }
}

fn run(home: &Path, args: &[&str]) -> (bool, String) {
    let output = Command::new(BIN)
        .args(args)
        .env("HOME", home)
        .env_remove("DBG_ATTACH_PLATFORM")
        .output()
        .unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (success, stdout) = run(home, args);
    assert!(success, "dbg-attach {args:?} failed");
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_resolve_launch_file() {
    let tmp = TempDir::new();
    let launch = tmp.write(
        ".vscode/launch.json",
        r#"{
            "version": "0.2.0",
            "configurations": [
                {"name": "Run", "type": "python", "request": "launch"},
                {"name": "Attach", "type": "python", "request": "attach", "port": 5678,
                 "localRoot": "/src", "remoteRoot": "/app", "pyramid": true}
            ]
        }"#,
    );

    let resolved = run_json(
        &tmp.0,
        &[
            "--config",
            launch.to_str().unwrap(),
            "--platform",
            "unix",
            "--workspace",
            "/ws",
        ],
    );

    assert_eq!(resolved["name"], "Attach");
    assert_eq!(resolved["port"], 5678);
    assert_eq!(resolved["host"], "localhost");
    assert_eq!(resolved["workspaceFolder"], "/ws");
    assert_eq!(
        resolved["debugOptions"],
        json!(["Jinja", "RedirectOutput", "UnixClient"])
    );
    assert_eq!(
        resolved["pathMappings"],
        json!([{"localRoot": "/src", "remoteRoot": "/app"}])
    );
}

#[test]
fn test_default_profile() {
    let tmp = TempDir::new();
    tmp.write(
        ".config/dbg-attach/attach.toml",
        r#"
host = "127.0.0.1"
redirectOutput = false
"#,
    );

    let resolved = run_json(&tmp.0, &["--platform", "windows", "--folder", "/project"]);
    assert_eq!(
        resolved["debugOptions"],
        json!(["FixFilePathCase", "WindowsClient"])
    );
    assert_eq!(
        resolved["pathMappings"],
        json!([{"localRoot": "/project", "remoteRoot": "/project"}])
    );
}

#[test]
fn test_no_profile() {
    let tmp = TempDir::new();
    let resolved = run_json(&tmp.0, &["--platform", "unix"]);
    assert_eq!(
        resolved,
        json!({
            "host": "localhost",
            "debugOptions": ["RedirectOutput", "UnixClient"],
            "pathMappings": [],
        })
    );
}

#[test]
fn test_multi_root_workspace() {
    let tmp = TempDir::new();
    let resolved = run_json(
        &tmp.0,
        &[
            "--platform",
            "unix",
            "--workspace",
            "/ws1",
            "--workspace",
            "/ws2",
            "--active-document",
            "/ws2/app/main.py",
        ],
    );
    assert_eq!(resolved["workspaceFolder"], "/ws2");
}

#[test]
fn test_map_path() {
    let tmp = TempDir::new();
    let profile = tmp.write(
        "remote.json",
        r#"{"host": "10.1.1.1", "pathMappings": [{"localRoot": "/src", "remoteRoot": "/app"}]}"#,
    );

    let (success, stdout) = run(
        &tmp.0,
        &[
            "--config",
            profile.to_str().unwrap(),
            "--map",
            "/src/pkg/views.py",
        ],
    );
    assert!(success);
    assert_eq!(stdout.trim(), "/app/pkg/views.py");
}

#[test]
fn test_errors() {
    let tmp = TempDir::new();
    let launch = tmp.write("launch.json", r#"{"configurations": []}"#);
    let unsupported = tmp.write("attach.yaml", "host: localhost");

    let (success, _) = run(
        &tmp.0,
        &["--config", launch.to_str().unwrap(), "--name", "Missing"],
    );
    assert!(!success);

    let (success, _) = run(&tmp.0, &["--config", unsupported.to_str().unwrap()]);
    assert!(!success);

    let (success, _) = run(&tmp.0, &["--platform", "beos"]);
    assert!(!success);
}

#[test]
#[serial]
fn test_default_profile_path() {
    let tmp = TempDir::new();
    let old_home = std::env::var_os("HOME");

    std::env::set_var("HOME", &tmp.0);
    let path = profile::default_path().unwrap();
    match old_home {
        Some(home) => std::env::set_var("HOME", home),
        None => std::env::remove_var("HOME"),
    }

    assert_eq!(path, tmp.0.join(".config/dbg-attach/attach.toml"));
}
