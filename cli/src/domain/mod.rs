//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod credentials;
pub mod error;
pub mod manifest;
pub mod matcher;
pub mod matching;
pub mod recipe;
pub mod repository;
pub mod taskfile;
pub mod variables;

pub use config::{ConfigDocument, ConfigValue, validate_config_key, validate_config_value};
pub use credentials::{Credentials, Profile};
pub use error::{
    ConfigError, CredentialError, DiscoveryError, ExecutionError, PromptError, RecipeLoadError,
    ResolveError, SelectionError, VariableResolutionError,
};
pub use manifest::{HostFacts, HostManifest, ProcessInfo};
pub use matcher::ProcessMatcher;
pub use matching::{first_match, match_recipes};
pub use recipe::{Recipe, RecipeMetadata, RecipeSource, Step, VariableConfig, parse_recipes};
pub use repository::RecipeRepository;
pub use taskfile::{RenderedTaskfile, render_taskfile};
pub use variables::{ResolveMode, VariableBindings};
