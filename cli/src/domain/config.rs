//! CLI configuration: field-descriptor table, scoped document and validators.
//!
//! Pure functions only — no I/O, no async, no filesystem access.
//!
//! Settings live in `config.json` under scope keys; the global scope is `"*"`.
//! Every known setting is described by one [`ConfigField`] entry in
//! [`CONFIG_FIELDS`], which drives listing, defaults and validation.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Scope key holding settings that apply to every profile.
pub const GLOBAL_SCOPE: &str = "*";

pub const VALID_LOG_LEVELS: &[&str] = &["Info", "Debug", "Trace", "Warn", "Error"];
pub const VALID_CONSENT_VALUES: &[&str] = &["NOT_ASKED", "DISALLOW", "ALLOW"];

// ── Field descriptors ────────────────────────────────────────────────────────

/// How a field's default value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Literal(&'static str),
    /// A path below the configuration directory.
    UnderConfigDir(&'static str),
}

/// Static description of one configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigField {
    pub name: &'static str,
    pub description: &'static str,
    pub default: FieldDefault,
    /// Accepted values (case-insensitive), or `None` for free-form.
    pub allowed: Option<&'static [&'static str]>,
}

impl ConfigField {
    #[must_use]
    pub fn default_value(&self, config_dir: &Path) -> String {
        match self.default {
            FieldDefault::Literal(v) => v.to_string(),
            FieldDefault::UnderConfigDir(rel) => config_dir.join(rel).display().to_string(),
        }
    }

    /// Validate `value` and return its canonical spelling.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `value` is not allowed.
    pub fn canonicalize(&self, value: &str) -> Result<String, ConfigError> {
        let Some(allowed) = self.allowed else {
            return Ok(value.to_string());
        };
        allowed
            .iter()
            .find(|a| a.eq_ignore_ascii_case(value))
            .map(|a| (*a).to_string())
            .ok_or_else(|| ConfigError::InvalidValue {
                key: self.name.to_string(),
                value: value.to_string(),
                valid: allowed.join(", "),
            })
    }
}

/// Every known setting, in listing order.
pub const CONFIG_FIELDS: &[ConfigField] = &[
    ConfigField {
        name: "loglevel",
        description: "Log verbosity",
        default: FieldDefault::Literal("Info"),
        allowed: Some(VALID_LOG_LEVELS),
    },
    ConfigField {
        name: "plugindir",
        description: "Directory where plugins are installed",
        default: FieldDefault::UnderConfigDir("plugins"),
        allowed: None,
    },
    ConfigField {
        name: "prereleasefeatures",
        description: "Opt in to prerelease features",
        default: FieldDefault::Literal("NOT_ASKED"),
        allowed: Some(VALID_CONSENT_VALUES),
    },
    ConfigField {
        name: "sendusagedata",
        description: "Send anonymous usage statistics",
        default: FieldDefault::Literal("NOT_ASKED"),
        allowed: Some(VALID_CONSENT_VALUES),
    },
];

/// Look up a field by name (case-insensitive).
///
/// # Errors
///
/// Returns `ConfigError::UnknownKey` listing the valid keys.
pub fn field(key: &str) -> Result<&'static ConfigField, ConfigError> {
    CONFIG_FIELDS
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| ConfigError::UnknownKey {
            key: key.to_string(),
            valid: CONFIG_FIELDS
                .iter()
                .map(|f| f.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Validates a configuration key against the descriptor table.
///
/// # Errors
///
/// Returns an error if the key is not a known setting.
pub fn validate_config_key(key: &str) -> Result<()> {
    field(key)?;
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is not allowed.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    field(key)?.canonicalize(value)?;
    Ok(())
}

// ── Config document ──────────────────────────────────────────────────────────

/// Contents of `config.json`: scope name → key → value.
///
/// Scopes other than the global one, and unknown keys, are preserved on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    scopes: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// One listed setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValue {
    pub name: String,
    pub value: String,
    pub default: String,
    pub is_default: bool,
}

impl ConfigDocument {
    fn stored(&self, name: &str) -> Option<String> {
        let scope = self.scopes.get(GLOBAL_SCOPE)?;
        let value = scope
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Effective value of a setting: stored value, else its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for an unknown key.
    pub fn get(&self, key: &str, config_dir: &Path) -> Result<ConfigValue, ConfigError> {
        let f = field(key)?;
        Ok(self.describe(f, config_dir))
    }

    fn describe(&self, f: &ConfigField, config_dir: &Path) -> ConfigValue {
        let default = f.default_value(config_dir);
        let value = self.stored(f.name).unwrap_or_else(|| default.clone());
        let is_default = value.eq_ignore_ascii_case(&default);
        ConfigValue {
            name: f.name.to_string(),
            value,
            default,
            is_default,
        }
    }

    /// All settings in descriptor order.
    #[must_use]
    pub fn list(&self, config_dir: &Path) -> Vec<ConfigValue> {
        CONFIG_FIELDS
            .iter()
            .map(|f| self.describe(f, config_dir))
            .collect()
    }

    /// Validate and store a value in the global scope.
    ///
    /// Returns the canonical value that was stored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a disallowed value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<String, ConfigError> {
        let f = field(key)?;
        let canonical = f.canonicalize(value)?;
        let scope = self.scopes.entry(GLOBAL_SCOPE.to_string()).or_default();
        scope.retain(|k, _| !k.eq_ignore_ascii_case(f.name));
        scope.insert(
            f.name.to_string(),
            serde_json::Value::String(canonical.clone()),
        );
        Ok(canonical)
    }

    /// Revert a setting to its default by storing the default value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for an unknown key.
    pub fn reset(&mut self, key: &str, config_dir: &Path) -> Result<String, ConfigError> {
        let f = field(key)?;
        let default = f.default_value(config_dir);
        self.set(f.name, &default)?;
        Ok(default)
    }

    /// Effective log level, falling back to the default when the stored value
    /// is not a valid level.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        self.stored("loglevel")
            .and_then(|v| {
                VALID_LOG_LEVELS
                    .iter()
                    .find(|l| l.eq_ignore_ascii_case(&v))
                    .copied()
            })
            .unwrap_or("Info")
    }
}

/// Map a configured log level to a `tracing` filter directive.
#[must_use]
pub fn tracing_directive(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
