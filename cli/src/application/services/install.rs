//! Application service — the install pipeline.
//!
//! Resolves and executes each candidate recipe, collecting one outcome per
//! recipe. A failing recipe never stops its siblings; only cancellation
//! stops the batch, and recipes not yet started are then reported skipped.

use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    CredentialLookup, EnvSource, ProgressReporter, Prompter, TaskEngine, TaskfileWriter,
};
use crate::application::services::execute::Executor;
use crate::application::services::resolve::Resolver;
use crate::domain::{ExecutionError, HostManifest, Recipe, render_taskfile};

/// Upper bound for `--concurrency`.
pub const MAX_CONCURRENCY: usize = 8;

/// Pipeline stage at which a recipe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Resolve,
    Render,
    Execute,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolve => write!(f, "resolve"),
            Self::Render => write!(f, "render"),
            Self::Execute => write!(f, "execute"),
        }
    }
}

/// What happened to one candidate recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecipeOutcome {
    Installed,
    Failed {
        stage: FailureStage,
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<String>,
    },
    Skipped {
        reason: String,
    },
}

/// Per-recipe line of the install report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeReport {
    pub recipe: String,
    #[serde(flatten)]
    pub outcome: RecipeOutcome,
    /// Rendered task file, filled on dry runs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taskfile: Option<String>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub recipes: Vec<RecipeReport>,
    pub cancelled: bool,
}

impl InstallReport {
    #[must_use]
    pub fn installed(&self) -> usize {
        self.recipes
            .iter()
            .filter(|r| r.outcome == RecipeOutcome::Installed)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.recipes
            .iter()
            .filter(|r| matches!(r.outcome, RecipeOutcome::Failed { .. }))
            .count()
    }

    /// True when nothing failed and the run was not cancelled.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.cancelled && self.failed() == 0
    }
}

/// Pipeline knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    /// Recipes in flight at once, clamped to `1..=MAX_CONCURRENCY`.
    pub concurrency: usize,
    /// Resolve and render only.
    pub dry_run: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dry_run: false,
        }
    }
}

/// The install pipeline for one invocation.
pub struct Installer<'a, E, P, C, W, T, R> {
    pub resolver: Resolver<'a, E, P, C>,
    pub executor: Executor<'a, W, T>,
    pub reporter: &'a R,
    pub options: InstallOptions,
}

impl<E, P, C, W, T, R> Installer<'_, E, P, C, W, T, R>
where
    E: EnvSource,
    P: Prompter,
    C: CredentialLookup,
    W: TaskfileWriter,
    T: TaskEngine,
    R: ProgressReporter,
{
    /// Install every candidate. The report lists candidates in the order
    /// given, regardless of concurrency.
    pub async fn run(
        &self,
        candidates: &[&Recipe],
        manifest: &HostManifest,
        cancel: &CancellationToken,
    ) -> InstallReport {
        let limit = self.options.concurrency.clamp(1, MAX_CONCURRENCY);
        tracing::info!(candidates = candidates.len(), concurrency = limit, "starting install");

        let recipes: Vec<RecipeReport> = stream::iter(candidates.iter().copied())
            .map(|recipe| self.install_one(recipe, manifest, cancel))
            .buffered(limit)
            .collect()
            .await;

        let report = InstallReport {
            recipes,
            cancelled: cancel.is_cancelled(),
        };
        tracing::info!(
            installed = report.installed(),
            failed = report.failed(),
            cancelled = report.cancelled,
            "install finished"
        );
        report
    }

    async fn install_one(
        &self,
        recipe: &Recipe,
        manifest: &HostManifest,
        cancel: &CancellationToken,
    ) -> RecipeReport {
        let name = recipe.name().to_string();
        if cancel.is_cancelled() {
            return RecipeReport {
                recipe: name,
                outcome: RecipeOutcome::Skipped {
                    reason: "cancelled".to_string(),
                },
                taskfile: None,
            };
        }

        self.reporter.step(&format!("Resolving variables for {name}..."));
        let bindings = match self.resolver.resolve(recipe, manifest) {
            Ok(b) => b,
            Err(e) => {
                self.reporter.warn(&format!("{name}: {e}"));
                return failed(name, FailureStage::Resolve, e.to_string(), None);
            }
        };

        if self.options.dry_run {
            return match render_taskfile(recipe, &bindings) {
                Ok(rendered) => {
                    self.reporter.success(&format!("{name} rendered (dry run)"));
                    RecipeReport {
                        recipe: name,
                        outcome: RecipeOutcome::Skipped {
                            reason: "dry run".to_string(),
                        },
                        taskfile: Some(rendered.yaml),
                    }
                }
                Err(e) => failed(name, FailureStage::Render, e.to_string(), None),
            };
        }

        self.reporter.step(&format!("Installing {name}..."));
        match self.executor.execute(recipe, &bindings, cancel).await {
            Ok(()) => {
                self.reporter.success(&format!("{name} installed"));
                RecipeReport {
                    recipe: name,
                    outcome: RecipeOutcome::Installed,
                    taskfile: None,
                }
            }
            Err(e) => {
                self.reporter.warn(&format!("{name}: {e}"));
                let stage = match e {
                    ExecutionError::Render(_) => FailureStage::Render,
                    _ => FailureStage::Execute,
                };
                let step = e.step_name().map(str::to_string);
                failed(name, stage, e.to_string(), step)
            }
        }
    }
}

fn failed(recipe: String, stage: FailureStage, reason: String, step: Option<String>) -> RecipeReport {
    tracing::warn!(recipe = %recipe, stage = %stage, reason = %reason, "recipe failed");
    RecipeReport {
        recipe,
        outcome: RecipeOutcome::Failed {
            stage,
            reason,
            step,
        },
        taskfile: None,
    }
}
