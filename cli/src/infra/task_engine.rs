//! Infrastructure implementations of the `TaskEngine` and `TaskfileWriter`
//! ports.
//!
//! Each step runs as its own `task --taskfile <file> <step>` child with the
//! invoking process's stdio inherited, so engine output streams through
//! unmodified. When stdout is reserved for a JSON document the child's stdout
//! is relayed to stderr instead.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, Result};
use tempfile::TempPath;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{TaskEngine, TaskOutcome, TaskfileWriter};

/// Environment variable overriding the task binary.
pub const TASK_BIN_ENV: &str = "NEW_RELIC_CLI_TASK_BIN";

/// Binary used when nothing else is configured.
pub const DEFAULT_TASK_BIN: &str = "task";

/// Runs steps with the external `task` binary.
pub struct GoTaskEngine {
    program: PathBuf,
    stdout_to_stderr: bool,
}

impl GoTaskEngine {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            stdout_to_stderr: false,
        }
    }

    /// Send the engine's stdout to our stderr.
    #[must_use]
    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }
}

impl TaskEngine for GoTaskEngine {
    async fn run_task(
        &self,
        taskfile: &Path,
        task: &str,
        cancel: &CancellationToken,
    ) -> Result<TaskOutcome> {
        let program = self.program.display().to_string();
        let mut child = tokio::process::Command::new(&self.program)
            .arg("--taskfile")
            .arg(taskfile)
            .arg(task)
            .stdin(Stdio::inherit())
            .stdout(if self.stdout_to_stderr {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let relay = child.stdout.take().map(|mut out| {
            tokio::spawn(async move {
                let mut err = tokio::io::stderr();
                tokio::io::copy(&mut out, &mut err).await
            })
        });

        tokio::select! {
            status = child.wait() => {
                let status = status.with_context(|| format!("waiting for {program}"))?;
                if let Some(relay) = relay {
                    if let Ok(Err(e)) = relay.await {
                        tracing::warn!(task, error = %e, "lost task output");
                    }
                }
                if status.success() {
                    Ok(TaskOutcome::Succeeded)
                } else {
                    Ok(TaskOutcome::Failed(format!("{program} exited with {status}")))
                }
            }
            () = cancel.cancelled() => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(task, error = %e, "failed to kill task process");
                }
                Ok(TaskOutcome::Cancelled)
            }
        }
    }
}

/// Writes task files to the system temp directory; each is deleted when its
/// handle drops.
pub struct TempTaskfiles;

impl TaskfileWriter for TempTaskfiles {
    type Handle = TempPath;

    fn write(&self, recipe: &str, yaml: &str) -> Result<TempPath> {
        let prefix: String = recipe
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{prefix}-"))
            .suffix(".yml")
            .tempfile()
            .context("cannot create task file")?;
        file.write_all(yaml.as_bytes())
            .context("cannot write task file")?;
        file.flush().context("cannot write task file")?;
        tracing::debug!(path = %file.path().display(), "task file written");
        Ok(file.into_temp_path())
    }
}
