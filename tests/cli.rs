use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("pkg-licenses").unwrap()
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("package-lock.json"),
        r#"{
  "name": "web",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "web", "version": "0.1.0" },
    "node_modules/react": { "version": "18.2.0", "license": "MIT" },
    "node_modules/internal-ui": { "version": "2.0.0" },
    "node_modules/chalk": { "version": "5.3.0", "dev": true }
  }
}"#,
    );
    write(
        &dir.path().join("node_modules/react/package.json"),
        r#"{
  "name": "react",
  "version": "18.2.0",
  "license": "MIT",
  "homepage": "https://reactjs.org/",
  "repository": { "type": "git", "url": "https://github.com/facebook/react.git" }
}"#,
    );
    write(
        &dir.path().join("node_modules/react/LICENSE"),
        "MIT License\n\nCopyright (c) Facebook, Inc.\n",
    );
    write(
        &dir.path().join("node_modules/internal-ui/package.json"),
        r#"{ "name": "internal-ui", "version": "2.0.0", "private": true }"#,
    );
    write(
        &dir.path().join("node_modules/chalk/package.json"),
        r#"{ "name": "chalk", "version": "5.3.0", "license": "MIT", "author": "Sindre Sorhus <sindresorhus@gmail.com> (https://sindresorhus.com)" }"#,
    );
    dir
}

#[test]
fn list_tree_is_default() {
    let dir = project();
    cmd()
        .args(["--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("licenses"))
        .stdout(contains("chalk@5.3.0"))
        .stdout(contains("VendorName: Sindre Sorhus"))
        .stdout(contains("UNKNOWN"));
}

#[test]
fn positional_path() {
    let dir = project();
    cmd()
        .arg(dir.path())
        .args(["list", "--quiet"])
        .assert()
        .success()
        .stdout(contains("react@18.2.0"));
}

#[test]
fn lockfile_v1_fails() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("package-lock.json"),
        r#"{ "lockfileVersion": 1, "dependencies": { "lodash": { "version": "4.17.21" } } }"#,
    );
    cmd()
        .args(["generate-disclaimer", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("lockfile v1 is not supported"));
}

#[test]
fn list_json_table() {
    let dir = project();
    let out = cmd()
        .args(["list", "--json", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["type"], "table");
    let body = json["data"]["body"].as_array().unwrap();
    assert_eq!(body.len(), 3);
    assert_eq!(body[0][0], "chalk");
    assert_eq!(body[1][0], "react");
    assert_eq!(body[1][3], "https://github.com/facebook/react.git");
    assert_eq!(body[2][0], "internal-ui");
    assert_eq!(body[2][2], "UNKNOWN");
    assert_eq!(body[2][5], "Unknown");
}

#[test]
fn list_production_skips_dev_packages() {
    let dir = project();
    cmd()
        .args(["list", "--production", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("react@18.2.0"))
        .stdout(contains("chalk").not());
}

#[test]
fn list_table_output() {
    let dir = project();
    cmd()
        .args(["list", "--table", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("VendorUrl"))
        .stdout(contains("https://reactjs.org/"));
}

#[test]
fn ls_warns_about_deprecation() {
    let dir = project();
    cmd()
        .args(["ls", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(contains("deprecated"))
        .stdout(contains("react@18.2.0"));
}

#[test]
fn config_ignore_list() {
    let dir = project();
    write(
        &dir.path().join(".pkg-licenses/config.toml"),
        "ignore = [\"react\"]\n",
    );
    cmd()
        .args(["list", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("react").not());
}

#[test]
fn generate_disclaimer_json() {
    let dir = project();
    let out = cmd()
        .args(["generate-disclaimer", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let entries = json.as_array().unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["react", "chalk"]);
    assert_eq!(
        entries[0]["licenseText"],
        "MIT License\n\nCopyright (c) Facebook, Inc."
    );
    assert!(entries[1].get("licenseText").is_none());
}

#[test]
fn missing_lockfile_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["list", "--quiet", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("package-lock.json"));
}
