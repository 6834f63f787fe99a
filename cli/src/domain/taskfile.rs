//! Rendering a recipe and its bindings into a task-engine task file.
//!
//! Pure transformation. The output is a version-3 Taskfile document:
//!
//! ```yaml
//! version: '3'
//! vars:
//!   NAME: value
//! tasks:
//!   <step name>: <step body>
//! ```
//!
//! `{{.NAME}}` placeholders of bound variables are substituted in every
//! string of every step body. Placeholders naming unbound variables are left
//! for the engine, which owns its built-in variables.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_yaml::{Mapping, Value};

use crate::domain::error::ExecutionError;
use crate::domain::recipe::Recipe;
use crate::domain::variables::VariableBindings;

/// Taskfile schema version understood by the engine.
pub const TASKFILE_VERSION: &str = "3";

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid regex")
});

/// A rendered task file ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTaskfile {
    /// YAML text of the task file.
    pub yaml: String,
    /// Step names in execution order.
    pub steps: Vec<String>,
}

/// Render `recipe` with `bindings`.
///
/// # Errors
///
/// Returns `ExecutionError::Render` if the document cannot be serialized.
pub fn render_taskfile(
    recipe: &Recipe,
    bindings: &VariableBindings,
) -> Result<RenderedTaskfile, ExecutionError> {
    let mut vars = Mapping::new();
    for (name, value) in bindings.iter() {
        vars.insert(Value::from(name), Value::from(value));
    }

    let mut tasks = Mapping::new();
    for step in &recipe.install_steps {
        let body = substitute(Value::Mapping(step.body.clone()), bindings);
        tasks.insert(Value::from(step.name.as_str()), body);
    }

    let mut root = Mapping::new();
    root.insert(Value::from("version"), Value::from(TASKFILE_VERSION));
    root.insert(Value::from("vars"), Value::Mapping(vars));
    root.insert(Value::from("tasks"), Value::Mapping(tasks));

    let yaml = serde_yaml::to_string(&Value::Mapping(root))
        .map_err(|e| ExecutionError::Render(e.to_string()))?;

    Ok(RenderedTaskfile {
        yaml,
        steps: recipe.install_steps.iter().map(|s| s.name.clone()).collect(),
    })
}

/// Replace bound placeholders in `text`.
#[must_use]
pub fn substitute_str(text: &str, bindings: &VariableBindings) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            bindings
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), str::to_string)
        })
        .into_owned()
}

fn substitute(value: Value, bindings: &VariableBindings) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(&s, bindings)),
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(|v| substitute(v, bindings)).collect())
        }
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, substitute(v, bindings)))
                .collect(),
        ),
        Value::Tagged(mut tagged) => {
            tagged.value = substitute(tagged.value, bindings);
            Value::Tagged(tagged)
        }
        other => other,
    }
}
