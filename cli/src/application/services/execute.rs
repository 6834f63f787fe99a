//! Application service — recipe execution through the task engine.

use tokio_util::sync::CancellationToken;

use crate::application::ports::{TaskEngine, TaskOutcome, TaskfileWriter};
use crate::domain::{ExecutionError, Recipe, VariableBindings, render_taskfile};

/// Drives one recipe's steps through the task engine.
pub struct Executor<'a, W, T> {
    pub writer: &'a W,
    pub engine: &'a T,
}

impl<W: TaskfileWriter, T: TaskEngine> Executor<'_, W, T> {
    /// Render `recipe` with `bindings`, write it out, and run its steps in
    /// declared order. The first failing step stops the recipe.
    ///
    /// The task file is removed before this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::Step` for a failing step,
    /// `ExecutionError::Cancelled` when `cancel` fires, and `Render`/`Io`
    /// when the task file cannot be produced.
    pub async fn execute(
        &self,
        recipe: &Recipe,
        bindings: &VariableBindings,
        cancel: &CancellationToken,
    ) -> Result<(), ExecutionError> {
        let rendered = render_taskfile(recipe, bindings)?;
        let taskfile = self
            .writer
            .write(recipe.name(), &rendered.yaml)
            .map_err(|e| ExecutionError::Io(format!("{e:#}")))?;

        for step in &rendered.steps {
            if cancel.is_cancelled() {
                return Err(ExecutionError::Cancelled { step: step.clone() });
            }
            tracing::debug!(recipe = recipe.name(), step = %step, "running step");

            let outcome = self
                .engine
                .run_task(taskfile.as_ref(), step, cancel)
                .await
                .map_err(|e| ExecutionError::Step {
                    step: step.clone(),
                    cause: format!("{e:#}"),
                })?;

            match outcome {
                TaskOutcome::Succeeded => {}
                TaskOutcome::Failed(cause) => {
                    return Err(ExecutionError::Step {
                        step: step.clone(),
                        cause,
                    });
                }
                TaskOutcome::Cancelled => {
                    return Err(ExecutionError::Cancelled { step: step.clone() });
                }
            }
        }

        tracing::info!(recipe = recipe.name(), steps = rendered.steps.len(), "recipe executed");
        Ok(())
    }
}
