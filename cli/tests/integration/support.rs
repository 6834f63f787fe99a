//! Shared helpers for spawning the binary against an isolated config dir.

#![allow(clippy::expect_used, dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A temp config directory plus a scratch area for recipe files.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// The binary with colors off, non-interactive, and this sandbox's config.
    pub fn newrelic(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("newrelic"));
        cmd.env("NO_COLOR", "1")
            .env("NEW_RELIC_CONFIG_DIR", self.config_dir())
            .env("NEW_RELIC_CLI_NON_INTERACTIVE", "1")
            .env_remove("NEW_RELIC_CLI_TASK_BIN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a recipe file and return its path.
    pub fn recipe_file(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, yaml).expect("write recipe");
        path
    }

    /// Add a default profile holding `license_key`.
    pub fn add_default_profile(&self, license_key: &str) {
        self.newrelic()
            .args(["profile", "add", "--name", "default", "--license-key", license_key])
            .assert()
            .success();
    }
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Parse the binary's stdout as one JSON document.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
