//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Discovery errors ──────────────────────────────────────────────────────────

/// The host process table could not be read at all.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Cannot enumerate processes: {0}")]
    ProcessTableUnavailable(String),

    #[error("Process discovery is not supported on {0}")]
    Unsupported(String),
}

// ── Recipe errors ─────────────────────────────────────────────────────────────

/// Errors raised while loading a recipe source.
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    #[error("Invalid recipe '{recipe}': {reason}")]
    Invalid { recipe: String, reason: String },

    #[error("Duplicate recipe name '{0}'")]
    Duplicate(String),

    #[error("Cannot parse recipe source {origin}: {reason}")]
    Malformed { origin: String, reason: String },

    #[error("Cannot read recipe source {origin}: {reason}")]
    Unreadable { origin: String, reason: String },
}

/// Errors raised while selecting recipes by name.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Recipe '{0}' not found. Run 'newrelic recipe list' to see available recipes.")]
    UnknownRecipe(String),
}

// ── Variable and credential errors ───────────────────────────────────────────

/// A declared input variable could not be given a value.
#[derive(Debug, Error)]
pub enum VariableResolutionError {
    #[error("No value for required variable '{name}' (set the {name} environment variable)")]
    Unresolved { name: String },

    #[error("Prompt for variable '{name}' was aborted")]
    PromptAborted { name: String },

    #[error("Prompt for variable '{name}' failed: {reason}")]
    PromptFailed { name: String, reason: String },
}

impl VariableResolutionError {
    /// Name of the variable that failed to resolve.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Unresolved { name }
            | Self::PromptAborted { name }
            | Self::PromptFailed { name, .. } => name,
        }
    }
}

/// Errors related to credential profiles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("License key not found in profile '{0}'")]
    MissingLicenseKey(String),

    #[error("Profile '{0}' not found. Run 'newrelic profile list' to see configured profiles.")]
    ProfileNotFound(String),

    #[error(
        "No default profile set. Add one with: newrelic profile add --name <name> --license-key <key> --default"
    )]
    NoDefaultProfile,

    #[error("Invalid profile name '{0}': must be non-empty and contain no whitespace")]
    InvalidName(String),
}

/// Failure of the variable-resolution stage for one recipe.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Variable(#[from] VariableResolutionError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Failure of the interactive prompt capability.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt aborted")]
    Aborted,

    #[error("prompt unavailable: {0}")]
    Unavailable(String),
}

// ── Execution errors ──────────────────────────────────────────────────────────

/// Failure while executing a recipe's install steps.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Step '{step}' failed: {cause}")]
    Step { step: String, cause: String },

    #[error("Cancelled during step '{step}'")]
    Cancelled { step: String },

    #[error("Cannot render task file: {0}")]
    Render(String),

    #[error("Cannot prepare task file: {0}")]
    Io(String),
}

impl ExecutionError {
    /// Name of the step that failed, when the failure happened inside one.
    #[must_use]
    pub fn step_name(&self) -> Option<&str> {
        match self {
            Self::Step { step, .. } | Self::Cancelled { step } => Some(step),
            Self::Render(_) | Self::Io(_) => None,
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
