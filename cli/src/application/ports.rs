//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    ConfigDocument, CredentialError, Credentials, DiscoveryError, ProcessInfo, PromptError,
    RecipeLoadError, RecipeSource,
};

// ── Discovery Ports ───────────────────────────────────────────────────────────

/// Why a single process could not be read during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReadFailure {
    pub pid: u32,
    pub reason: String,
}

/// Result of reading one process-table entry.
pub type ProcessProbe = std::result::Result<ProcessInfo, ProcessReadFailure>;

/// Read-only access to the OS process table.
pub trait ProcessTable {
    /// Enumerate every process visible to the current user.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError` only when the table itself cannot be opened;
    /// failures on individual processes are reported as `Err` entries.
    fn list_processes(&self) -> std::result::Result<Vec<ProcessProbe>, DiscoveryError>;
}

/// Best-effort host platform facts. `None` means the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHostFacts {
    pub os: Option<String>,
    pub platform: Option<String>,
    pub platform_family: Option<String>,
    pub platform_version: Option<String>,
    pub kernel_arch: Option<String>,
    pub kernel_version: Option<String>,
}

/// Platform-information capability.
pub trait HostFactsProvider {
    fn current_host_facts(&self) -> RawHostFacts;
}

// ── Recipe Source Port ────────────────────────────────────────────────────────

/// One readable unit of recipe text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Where the text came from, for error messages.
    pub origin: String,
    pub text: String,
}

/// Reads raw recipe text from a source.
pub trait RecipeSourceReader {
    /// # Errors
    ///
    /// Returns `RecipeLoadError::Unreadable` when the source cannot be read.
    fn read(&self, source: &RecipeSource)
    -> std::result::Result<Vec<SourceDocument>, RecipeLoadError>;
}

// ── Resolution Ports ──────────────────────────────────────────────────────────

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// Interactive line prompting.
pub trait Prompter {
    /// Ask for a value, pre-filling `default` when given.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Aborted` when the user cancels.
    fn prompt(&self, label: &str, default: Option<&str>) -> std::result::Result<String, PromptError>;
}

/// Read-only credential lookups for one pipeline run.
pub trait CredentialLookup {
    /// # Errors
    ///
    /// Returns `ProfileNotFound` or `MissingLicenseKey`.
    fn license_key(&self, profile: &str) -> std::result::Result<String, CredentialError>;
}

// ── Persistence Ports ─────────────────────────────────────────────────────────

/// Abstracts CLI configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration document, or an empty one if none exists.
    fn load(&self) -> Result<ConfigDocument>;
    /// Persist the configuration document.
    fn save(&self, config: &ConfigDocument) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts credential-profile persistence.
pub trait CredentialStore {
    /// Load all profiles and the default profile name.
    fn load(&self) -> Result<Credentials>;
    /// Persist all profiles and the default profile name.
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Take a read-only snapshot for one pipeline run.
    fn open(&self) -> Result<CredentialsHandle> {
        Ok(CredentialsHandle(self.load()?))
    }
}

/// Read-only credential snapshot. Nothing written through the store after
/// `open` is visible here.
#[derive(Debug, Clone)]
pub struct CredentialsHandle(Credentials);

impl CredentialsHandle {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self(credentials)
    }

    /// Profile to use: `requested`, else the default profile.
    ///
    /// # Errors
    ///
    /// See [`Credentials::active_profile`].
    pub fn active_profile(
        &self,
        requested: Option<&str>,
    ) -> std::result::Result<String, CredentialError> {
        self.0.active_profile(requested).map(str::to_string)
    }
}

impl CredentialLookup for CredentialsHandle {
    fn license_key(&self, profile: &str) -> std::result::Result<String, CredentialError> {
        self.0.license_key(profile).map(str::to_string)
    }
}

// ── Task Engine Ports ─────────────────────────────────────────────────────────

/// Writes rendered task files to a transient location.
pub trait TaskfileWriter {
    /// Removes the file when dropped.
    type Handle: AsRef<Path>;

    /// Write `yaml` for `recipe` and return a handle to the file.
    fn write(&self, recipe: &str, yaml: &str) -> Result<Self::Handle>;
}

/// Result of running one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    /// The task ran and failed; the string describes how.
    Failed(String),
    /// The run was cancelled and the task's process killed.
    Cancelled,
}

/// External step-execution engine.
#[allow(async_fn_in_trait)]
pub trait TaskEngine {
    /// Run a single task from a task file, streaming its output to the
    /// invoking process's standard streams.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be started at all.
    async fn run_task(
        &self,
        taskfile: &Path,
        task: &str,
        cancel: &CancellationToken,
    ) -> Result<TaskOutcome>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
