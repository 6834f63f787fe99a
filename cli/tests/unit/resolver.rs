//! Variable resolution: precedence, modes and injected bindings.

#![allow(clippy::expect_used)]

use newrelic_cli::application::services::resolve::Resolver;
use newrelic_cli::domain::{
    CredentialError, ResolveError, ResolveMode, VariableResolutionError,
};

use crate::mocks::{MapEnv, MemCredentials, NoPrompt, ScriptedPrompter, manifest, recipe};

const MYSQL: &str = r#"
name: mysql-open-source-integration
processMatch:
  - mysqld
inputVars:
  - name: NR_CLI_DB_USERNAME
    prompt: MySQL user
  - name: NR_CLI_DB_PORT
    prompt: MySQL port
    default: "3306"
install:
  - name: configure
    cmds: ["echo {{.NR_CLI_DB_USERNAME}}:{{.NR_CLI_DB_PORT}}"]
"#;

#[test]
fn test_environment_wins_over_prompt() {
    let env = MapEnv::with(&[("NR_CLI_DB_USERNAME", "root"), ("NR_CLI_DB_PORT", "3307")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::Interactive,
    };

    let bindings = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect("resolved");

    assert_eq!(bindings.get("NR_CLI_DB_USERNAME"), Some("root"));
    assert_eq!(bindings.get("NR_CLI_DB_PORT"), Some("3307"));
}

#[test]
fn test_interactive_prompts_for_unset_variables() {
    let env = MapEnv::default();
    let prompter = ScriptedPrompter::answering(&[("MySQL user", "admin")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &prompter,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::Interactive,
    };

    let bindings = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect("resolved");

    assert_eq!(bindings.get("NR_CLI_DB_USERNAME"), Some("admin"));
    assert_eq!(bindings.get("NR_CLI_DB_PORT"), Some("3306"), "default pre-filled");
    assert_eq!(prompter.asked(), vec!["MySQL user", "MySQL port"]);
}

#[test]
fn test_empty_environment_value_counts_as_unset() {
    let env = MapEnv::with(&[("NR_CLI_DB_USERNAME", "")]);
    let prompter = ScriptedPrompter::answering(&[("MySQL user", "prompted")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &prompter,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::Interactive,
    };

    let bindings = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect("resolved");

    assert_eq!(bindings.get("NR_CLI_DB_USERNAME"), Some("prompted"));
}

#[test]
fn test_non_interactive_unset_variable_fails_even_with_default() {
    let env = MapEnv::with(&[("NR_CLI_DB_USERNAME", "root")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::NonInteractive {
            accept_defaults: false,
        },
    };

    let err = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect_err("port unresolved");

    assert!(matches!(
        err,
        ResolveError::Variable(VariableResolutionError::Unresolved { ref name })
            if name == "NR_CLI_DB_PORT"
    ));
}

#[test]
fn test_non_interactive_accept_defaults_uses_declared_default() {
    let env = MapEnv::with(&[("NR_CLI_DB_USERNAME", "root")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::NonInteractive {
            accept_defaults: true,
        },
    };

    let bindings = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect("resolved");

    assert_eq!(bindings.get("NR_CLI_DB_PORT"), Some("3306"));
}

#[test]
fn test_non_interactive_accept_defaults_without_default_still_fails() {
    let env = MapEnv::default();
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::NonInteractive {
            accept_defaults: true,
        },
    };

    let err = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect_err("username has no default");

    assert!(matches!(
        err,
        ResolveError::Variable(VariableResolutionError::Unresolved { ref name })
            if name == "NR_CLI_DB_USERNAME"
    ));
}

#[test]
fn test_aborted_prompt_fails_resolution() {
    let env = MapEnv::default();
    let prompter = ScriptedPrompter::default();
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &prompter,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::Interactive,
    };

    let err = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect_err("aborted");

    assert!(matches!(
        err,
        ResolveError::Variable(VariableResolutionError::PromptAborted { .. })
    ));
}

#[test]
fn test_license_key_and_host_facts_injected() {
    let env = MapEnv::with(&[("NR_CLI_DB_USERNAME", "root"), ("NR_CLI_DB_PORT", "3306")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::Interactive,
    };

    let bindings = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect("resolved");

    assert_eq!(bindings.get("NR_LICENSE_KEY"), Some("lic-123"));
    assert_eq!(bindings.get("OS"), Some("linux"));
    assert_eq!(bindings.get("Platform"), Some("ubuntu"));
    assert_eq!(bindings.get("PlatformFamily"), Some("debian"));
    assert_eq!(bindings.get("PlatformVersion"), Some("22.04"));
    assert_eq!(bindings.get("KernelArch"), Some("x86_64"));
    assert_eq!(bindings.get("KernelVersion"), Some("6.1.0"));
}

#[test]
fn test_system_bindings_override_declared_variables() {
    let text = r#"
name: sneaky
inputVars:
  - name: OS
    default: plan9
  - name: NR_LICENSE_KEY
    default: fake
install:
  - name: run
    cmds: ["true"]
"#;
    let env = MapEnv::default();
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::NonInteractive {
            accept_defaults: true,
        },
    };

    let bindings = resolver
        .resolve(&recipe(text), &manifest(vec![]))
        .expect("resolved");

    assert_eq!(bindings.get("OS"), Some("linux"));
    assert_eq!(bindings.get("NR_LICENSE_KEY"), Some("lic-123"));
}

#[test]
fn test_system_named_variable_is_neither_read_nor_prompted() {
    let text = r#"
name: platform-aware
inputVars:
  - name: Platform
  - name: KernelArch
    prompt: Architecture
install:
  - name: run
    cmds: ["echo {{.Platform}}/{{.KernelArch}}"]
"#;
    let env = MapEnv::with(&[("Platform", "from-env")]);
    let creds = MemCredentials::with_key("default", "lic-123");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::NonInteractive {
            accept_defaults: false,
        },
    };

    let bindings = resolver
        .resolve(&recipe(text), &manifest(vec![]))
        .expect("host facts supply both");

    assert_eq!(bindings.get("Platform"), Some("ubuntu"));
    assert_eq!(bindings.get("KernelArch"), Some("x86_64"));
}

#[test]
fn test_missing_license_key_fails_before_prompting() {
    let env = MapEnv::default();
    let creds = MemCredentials::empty_profile("default");
    let resolver = Resolver {
        env: &env,
        prompter: &NoPrompt,
        credentials: &creds,
        profile: "default",
        mode: ResolveMode::Interactive,
    };

    let err = resolver
        .resolve(&recipe(MYSQL), &manifest(vec![]))
        .expect_err("no license key");

    assert!(matches!(
        err,
        ResolveError::Credential(CredentialError::MissingLicenseKey(ref p)) if p == "default"
    ));
}
