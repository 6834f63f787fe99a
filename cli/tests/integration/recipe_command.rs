//! Integration tests for `newrelic recipe` and `newrelic discover`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::support::{Sandbox, path_arg, stdout_json};

const CATALOG: &str = r#"
name: nginx-open-source-integration
description: NGINX monitoring
processMatch:
  - nginx
install:
  - name: install
    cmds: ["true"]
---
name: redis-open-source-integration
description: Redis monitoring
processMatch:
  - regex: "redis-server"
inputVars:
  - name: NR_CLI_REDIS_PORT
install:
  - name: install
    cmds: ["true"]
"#;

#[test]
fn test_recipe_list_json() {
    let sandbox = Sandbox::new();
    let file = sandbox.recipe_file("catalog.yml", CATALOG);

    let output = sandbox
        .newrelic()
        .args(["recipe", "list", "--json", "--recipe-file", &path_arg(&file)])
        .output()
        .expect("run");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json[0]["name"], "nginx-open-source-integration");
    assert_eq!(json[1]["name"], "redis-open-source-integration");
    assert_eq!(json[1]["processMatch"][0], "regex:redis-server");
    assert_eq!(json[1]["inputVars"][0], "NR_CLI_REDIS_PORT");
}

#[test]
fn test_recipe_list_from_directory() {
    let sandbox = Sandbox::new();
    let dir = sandbox.dir.path().join("recipes");
    std::fs::create_dir(&dir).expect("mkdir");
    std::fs::write(dir.join("b.yml"), "name: beta\ninstall:\n  - name: run\n").expect("write");
    std::fs::write(dir.join("a.yaml"), "name: alpha\ninstall:\n  - name: run\n").expect("write");
    std::fs::write(dir.join("notes.txt"), "not a recipe").expect("write");

    sandbox
        .newrelic()
        .args(["recipe", "list", "--recipe-dir", &path_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"));
}

#[test]
fn test_recipe_list_duplicate_names_fail() {
    let sandbox = Sandbox::new();
    let file = sandbox.recipe_file(
        "dup.yml",
        "name: a\ninstall:\n  - name: run\n---\nname: a\ninstall:\n  - name: run\n",
    );

    sandbox
        .newrelic()
        .args(["recipe", "list", "--recipe-file", &path_arg(&file)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate recipe name 'a'"));
}

#[test]
fn test_recipe_list_requires_a_source() {
    let sandbox = Sandbox::new();
    sandbox
        .newrelic()
        .args(["recipe", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no recipe sources given"));
}

/// The CLI's own command line carries the marker, so the recipe matches the
/// `newrelic` process itself.
#[cfg(target_os = "linux")]
#[test]
fn test_recipe_match_finds_own_process() {
    let sandbox = Sandbox::new();
    let marker = "zz-match-marker-41";
    let file = sandbox.recipe_file(
        "self.yml",
        &format!("name: self\nprocessMatch:\n  - {marker}\ninstall:\n  - name: run\n"),
    );

    let output = sandbox
        .newrelic()
        .args(["recipe", "match", "--json", "--recipe-file", &path_arg(&file)])
        .args(["--process-filter", marker])
        .output()
        .expect("run");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json[0]["name"], "self");
    assert!(
        json[0]["matchedProcess"]["commandLine"]
            .as_str()
            .is_some_and(|c| c.contains(marker))
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_discover_json_reports_host_facts() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .newrelic()
        .args(["discover", "--json"])
        .output()
        .expect("run");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["os"], "linux");
    assert!(json["processes"].as_array().is_some_and(|p| !p.is_empty()));
}
