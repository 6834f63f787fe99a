//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is the explicit configuration context: it owns the loaded
//! configuration document and the stores, so nothing reads settings through
//! a global handle.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use anyhow::Result;

use crate::application::services::config_service;
use crate::domain::ConfigDocument;
use crate::infra::config::JsonConfigStore;
use crate::infra::credentials::JsonCredentialStore;
use crate::infra::fs::config_dir;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Environment variable forcing non-interactive mode.
pub const NON_INTERACTIVE_ENV: &str = "NEW_RELIC_CLI_NON_INTERACTIVE";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Directory holding `config.json` and the credential files.
    pub config_dir: PathBuf,
    /// Configuration as loaded at startup.
    pub config: ConfigDocument,
    pub config_store: JsonConfigStore,
    pub credential_store: JsonCredentialStore,
    /// `true` when `CI` or `NEW_RELIC_CLI_NON_INTERACTIVE` is set, or stdin
    /// is not a terminal.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or `config.json` exists but cannot be parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let env_forced = std::env::var_os("CI").is_some()
            || std::env::var_os(NON_INTERACTIVE_ENV).is_some();
        let non_interactive = env_forced || !std::io::stdin().is_terminal();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_dir = config_dir()?;
        let config_store = JsonConfigStore::new(config_dir.clone());
        let config = config_service::load_config(&config_store)?;

        Ok(Self {
            // stdout carries exactly one JSON document in JSON mode.
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            credential_store: JsonCredentialStore::new(config_dir.clone()),
            config_dir,
            config,
            config_store,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}
