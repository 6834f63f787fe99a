//! Store and environment tests against real files and process env vars.
//!
//! Tests that mutate process environment variables are `#[serial]`.

#![allow(clippy::expect_used, unsafe_code)]

use serial_test::serial;
use tempfile::TempDir;

use newrelic_cli::application::ports::{
    ConfigStore, CredentialLookup, CredentialStore, EnvSource,
};
use newrelic_cli::application::services::{config_service, profile_service};
use newrelic_cli::domain::{CredentialError, Profile};
use newrelic_cli::infra::config::JsonConfigStore;
use newrelic_cli::infra::credentials::JsonCredentialStore;
use newrelic_cli::infra::env::ProcessEnv;
use newrelic_cli::infra::fs::{CONFIG_DIR_ENV, config_dir};

#[test]
#[serial]
fn test_config_dir_env_override() {
    let dir = TempDir::new().expect("temp dir");
    // SAFETY: serialized with every other env-mutating test.
    unsafe { std::env::set_var(CONFIG_DIR_ENV, dir.path()) };
    let resolved = config_dir().expect("config dir");
    unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
    assert_eq!(resolved, dir.path());
}

#[test]
#[serial]
fn test_config_dir_empty_env_falls_back_to_home() {
    unsafe { std::env::set_var(CONFIG_DIR_ENV, "") };
    let resolved = config_dir().expect("config dir");
    unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
    assert!(resolved.ends_with(".newrelic"), "{}", resolved.display());
}

#[test]
#[serial]
fn test_process_env_reads_variables() {
    let name = "NR_CLI_UNIT_TEST_VARIABLE";
    unsafe { std::env::set_var(name, "value-1") };
    let value = ProcessEnv.var(name);
    unsafe { std::env::remove_var(name) };
    assert_eq!(value.as_deref(), Some("value-1"));
    assert_eq!(ProcessEnv.var(name), None);
}

#[test]
fn test_config_roundtrip_through_json_store() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonConfigStore::new(dir.path().to_path_buf());

    config_service::set_setting(&store, "sendUsageData", "allow").expect("set");

    let doc = store.load().expect("load");
    let value = config_service::get_setting(&doc, "sendusagedata", dir.path()).expect("get");
    assert_eq!(value.value, "ALLOW");
    assert!(!value.is_default);
}

#[test]
fn test_config_unknown_scopes_preserved_on_save() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"*": {"loglevel": "Warn"}, "other": {"custom": "x"}}"#,
    )
    .expect("seed");
    let store = JsonConfigStore::new(dir.path().to_path_buf());

    config_service::set_setting(&store, "plugindir", "/opt/plugins").expect("set");

    let raw = std::fs::read_to_string(dir.path().join("config.json")).expect("read");
    assert!(raw.contains("\"other\""), "{raw}");
    assert!(raw.contains("/opt/plugins"), "{raw}");
    assert_eq!(store.load().expect("load").log_level(), "Warn");
}

#[test]
fn test_credentials_handle_is_a_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonCredentialStore::new(dir.path().to_path_buf());
    profile_service::add_profile(
        &store,
        "default",
        Profile {
            license_key: "before".to_string(),
            ..Profile::default()
        },
        false,
    )
    .expect("add");

    let handle = profile_service::open_credentials(&store).expect("open");
    profile_service::add_profile(
        &store,
        "default",
        Profile {
            license_key: "after".to_string(),
            ..Profile::default()
        },
        false,
    )
    .expect("replace");

    assert_eq!(handle.license_key("default").as_deref(), Ok("before"));
    assert_eq!(handle.active_profile(None).as_deref(), Ok("default"));
    assert_eq!(
        store.open().expect("reopen").license_key("default").as_deref(),
        Ok("after")
    );
}

#[test]
fn test_default_profile_file_tolerates_bare_name() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("credentials.json"),
        r#"{"prod": {"licenseKey": "lk", "region": "us", "accountID": 42}}"#,
    )
    .expect("seed");
    std::fs::write(dir.path().join("default-profile.json"), "prod\n").expect("seed");
    let store = JsonCredentialStore::new(dir.path().to_path_buf());

    let creds = store.load().expect("load");
    assert_eq!(creds.default_profile.as_deref(), Some("prod"));
    assert_eq!(creds.profiles["prod"].account_id, 42);
}

#[test]
fn test_unknown_profile_lookup_fails() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonCredentialStore::new(dir.path().to_path_buf());
    let handle = store.open().expect("open");

    assert_eq!(
        handle.license_key("ghost"),
        Err(CredentialError::ProfileNotFound("ghost".to_string()))
    );
    assert_eq!(
        handle.active_profile(None),
        Err(CredentialError::NoDefaultProfile)
    );
}
