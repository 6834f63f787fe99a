//! Application service — per-recipe variable resolution.
//!
//! Declared input variables are resolved from the environment first, then
//! by prompting (interactive mode only). Host facts and the active profile's
//! license key are injected afterwards; a declared variable carrying one of
//! those names is never looked up or prompted for.

use std::sync::{Mutex, PoisonError};

use crate::application::ports::{CredentialLookup, EnvSource, Prompter};
use crate::domain::variables::{
    LICENSE_KEY_VAR, declared_default, env_value, is_system_var, prompt_label,
};
use crate::domain::{
    HostManifest, PromptError, Recipe, ResolveError, ResolveMode, VariableBindings,
    VariableConfig, VariableResolutionError,
};

/// Resolves the bindings for one recipe at a time.
///
/// Holds only shared references; every call builds fresh bindings.
pub struct Resolver<'a, E, P, C> {
    pub env: &'a E,
    pub prompter: &'a P,
    pub credentials: &'a C,
    /// Credential profile whose license key is injected.
    pub profile: &'a str,
    pub mode: ResolveMode,
}

impl<E: EnvSource, P: Prompter, C: CredentialLookup> Resolver<'_, E, P, C> {
    /// Resolve every binding `recipe` needs.
    ///
    /// The license key is looked up before any prompt is shown.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Credential` when the profile has no license key
    /// and `ResolveError::Variable` when a declared variable cannot be
    /// resolved or its prompt is aborted.
    pub fn resolve(
        &self,
        recipe: &Recipe,
        manifest: &HostManifest,
    ) -> Result<VariableBindings, ResolveError> {
        let license_key = self.credentials.license_key(self.profile)?;

        let mut bindings = VariableBindings::new();
        for var in &recipe.input_variables {
            if is_system_var(&var.name) {
                tracing::debug!(name = %var.name, "variable supplied by the host");
                continue;
            }
            let value = self.resolve_variable(var)?;
            bindings.insert(var.name.clone(), value);
        }

        bindings.apply_host_facts(manifest.facts());
        bindings.insert(LICENSE_KEY_VAR, license_key);

        tracing::debug!(
            recipe = recipe.name(),
            bindings = bindings.len(),
            "variables resolved"
        );
        Ok(bindings)
    }

    fn resolve_variable(&self, var: &VariableConfig) -> Result<String, VariableResolutionError> {
        if let Some(value) = env_value(self.env.var(&var.name)) {
            tracing::debug!(name = %var.name, "variable taken from environment");
            return Ok(value);
        }

        match self.mode {
            ResolveMode::Interactive => self
                .prompter
                .prompt(&prompt_label(var), declared_default(var))
                .map_err(|e| match e {
                    PromptError::Aborted => VariableResolutionError::PromptAborted {
                        name: var.name.clone(),
                    },
                    PromptError::Unavailable(reason) => VariableResolutionError::PromptFailed {
                        name: var.name.clone(),
                        reason,
                    },
                }),
            ResolveMode::NonInteractive {
                accept_defaults: true,
            } => declared_default(var).map(str::to_string).ok_or_else(|| {
                VariableResolutionError::Unresolved {
                    name: var.name.clone(),
                }
            }),
            ResolveMode::NonInteractive {
                accept_defaults: false,
            } => Err(VariableResolutionError::Unresolved {
                name: var.name.clone(),
            }),
        }
    }
}

/// A prompter that allows only one prompt at a time.
///
/// Recipes resolved concurrently share one of these so terminal input never
/// interleaves.
pub struct SerializedPrompter<P> {
    inner: P,
    lock: Mutex<()>,
}

impl<P> SerializedPrompter<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }
}

impl<P: Prompter> Prompter for SerializedPrompter<P> {
    fn prompt(&self, label: &str, default: Option<&str>) -> Result<String, PromptError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.inner.prompt(label, default)
    }
}
