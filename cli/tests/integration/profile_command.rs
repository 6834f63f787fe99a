//! Integration tests for `newrelic profile`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::support::{Sandbox, stdout_json};

#[test]
fn test_profile_list_empty() {
    let sandbox = Sandbox::new();
    sandbox
        .newrelic()
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_first_profile_becomes_default_and_secrets_are_masked() {
    let sandbox = Sandbox::new();
    sandbox
        .newrelic()
        .args([
            "profile",
            "add",
            "--name",
            "work",
            "--license-key",
            "abcdef123456",
            "--region",
            "EU",
        ])
        .assert()
        .success();

    let output = sandbox
        .newrelic()
        .args(["profile", "list", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json[0]["name"], "work");
    assert_eq!(json[0]["isDefault"], true);
    assert_eq!(json[0]["region"], "eu");
    assert_eq!(json[0]["licenseKey"], "********3456");

    let stored = std::fs::read_to_string(sandbox.config_dir().join("default-profile.json"))
        .expect("default profile written");
    assert_eq!(stored.trim(), "\"work\"");
}

#[test]
fn test_profile_default_switches_default() {
    let sandbox = Sandbox::new();
    sandbox.add_default_profile("key-one-1111");
    sandbox
        .newrelic()
        .args(["profile", "add", "--name", "other", "--license-key", "key-two-2222"])
        .assert()
        .success();
    sandbox
        .newrelic()
        .args(["profile", "default", "other"])
        .assert()
        .success();

    let output = sandbox
        .newrelic()
        .args(["profile", "list", "--json"])
        .output()
        .expect("run");
    let json = stdout_json(&output);
    let default: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .filter(|p| p["isDefault"] == true)
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(default, vec!["other"]);
}

#[test]
fn test_profile_default_unknown_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .newrelic()
        .args(["profile", "default", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_profile_delete_removes_profile() {
    let sandbox = Sandbox::new();
    sandbox.add_default_profile("key-one-1111");
    sandbox
        .newrelic()
        .args(["profile", "delete", "default"])
        .assert()
        .success();
    sandbox
        .newrelic()
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_profile_name_with_whitespace_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .newrelic()
        .args(["profile", "add", "--name", "my profile", "--license-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid profile name"));
}
