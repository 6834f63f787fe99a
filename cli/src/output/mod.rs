//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::install::InstallReport;
use crate::domain::{ConfigValue, Credentials, HostManifest, ProcessInfo, Recipe};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.ok));
        }
    }

    /// Print a warning message prefixed with `⚠` to stderr. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "⚠".style(self.styles.warn));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.fail));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.accent));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.accent.bold()));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Output renderer selected by `--json`.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the install report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(&self, report: &InstallReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_report(report);
                Ok(())
            }
            Self::Json(r) => r.render_report(report),
        }
    }

    /// Render loaded recipes.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_recipes(&self, recipes: &[Recipe]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_recipes(recipes);
                Ok(())
            }
            Self::Json(r) => r.render_recipes(recipes),
        }
    }

    /// Render matched candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_candidates(&self, candidates: &[(&Recipe, Option<&ProcessInfo>)]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_candidates(candidates);
                Ok(())
            }
            Self::Json(r) => r.render_candidates(candidates),
        }
    }

    /// Render the host manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_manifest(&self, manifest: &HostManifest) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_manifest(manifest);
                Ok(())
            }
            Self::Json(r) => r.render_manifest(manifest),
        }
    }

    /// Render configuration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_settings(&self, settings: &[ConfigValue]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_settings(settings);
                Ok(())
            }
            Self::Json(r) => r.render_settings(settings),
        }
    }

    /// Render configured profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_profiles(&self, creds: &Credentials) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_profiles(creds);
                Ok(())
            }
            Self::Json(r) => r.render_profiles(creds),
        }
    }

    /// Render version information.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_version(version),
        }
    }
}
