//! Variable bindings and the fixed rules of variable resolution.
//!
//! The resolution *procedure* lives in `application::services::resolve`
//! because it needs the environment, prompt and credential ports; this module
//! holds the data types and pure rules it applies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::manifest::HostFacts;
use crate::domain::recipe::VariableConfig;

/// Binding name for the license key of the active credential profile.
pub const LICENSE_KEY_VAR: &str = "NR_LICENSE_KEY";

/// Names of the system bindings injected into every recipe run.
pub const SYSTEM_VARS: &[&str] = &[
    "OS",
    "Platform",
    "PlatformFamily",
    "PlatformVersion",
    "KernelArch",
    "KernelVersion",
    LICENSE_KEY_VAR,
];

/// Resolved name → value map for a single recipe execution.
///
/// Built fresh per recipe; never shared between recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableBindings(BTreeMap<String, String>);

impl VariableBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite bindings with the host facts. System facts win over any
    /// same-named declared variable.
    pub fn apply_host_facts(&mut self, facts: &HostFacts) {
        for (name, value) in system_bindings(facts) {
            self.insert(name, value);
        }
    }
}

/// How missing variables are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Prompt for missing values, pre-filling declared defaults.
    Interactive,
    /// Never prompt. Declared defaults are only used when
    /// `accept_defaults` is set; otherwise a missing value is an error.
    NonInteractive { accept_defaults: bool },
}

/// `true` when `name` is supplied by the resolver itself and never looked
/// up in the environment or prompted for.
#[must_use]
pub fn is_system_var(name: &str) -> bool {
    SYSTEM_VARS.contains(&name)
}

/// Host-fact bindings, in a fixed order.
#[must_use]
pub fn system_bindings(facts: &HostFacts) -> [(&'static str, String); 6] {
    [
        ("OS", facts.os.clone()),
        ("Platform", facts.platform.clone()),
        ("PlatformFamily", facts.platform_family.clone()),
        ("PlatformVersion", facts.platform_version.clone()),
        ("KernelArch", facts.kernel_arch.clone()),
        ("KernelVersion", facts.kernel_version.clone()),
    ]
}

/// Label shown when prompting for `var`.
#[must_use]
pub fn prompt_label(var: &VariableConfig) -> String {
    match var.prompt_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("value for {} required", var.name),
    }
}

/// An empty environment value counts as unset.
#[must_use]
pub fn env_value(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.is_empty())
}

/// A declared default, ignoring empty strings.
#[must_use]
pub fn declared_default(var: &VariableConfig) -> Option<&str> {
    var.default_value.as_deref().filter(|d| !d.is_empty())
}
