//! Recipe types and the recipe-document parser.
//!
//! Pure functions only — the caller supplies the source text. A source may
//! contain several YAML documents separated by `---`; each non-empty document
//! is one recipe.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_yaml::{Mapping, Value};

use crate::domain::error::RecipeLoadError;
use crate::domain::matcher::ProcessMatcher;

// ── Types ────────────────────────────────────────────────────────────────────

/// Where recipe definitions are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeSource {
    /// A single YAML file, possibly holding several documents.
    File(PathBuf),
    /// Every `*.yml` / `*.yaml` file in a directory, in file-name order.
    Directory(PathBuf),
}

impl std::fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(p) | Self::Directory(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Descriptive and matching data of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeMetadata {
    /// Unique key within a repository.
    pub name: String,
    pub description: String,
    pub process_match: Vec<ProcessMatcher>,
    pub validation_url: Option<String>,
    pub ports: Vec<u16>,
}

/// An input variable a recipe needs before it can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    /// Prompt label; a generated message is used when absent.
    #[serde(
        default,
        rename = "prompt",
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_text: Option<String>,
    /// Any YAML scalar; `default: 8080` reads as `"8080"`.
    #[serde(
        default,
        rename = "default",
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(de::Error::custom("expected a scalar value")),
    }
}

/// One named install step. The body is opaque and handed to the task engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub body: Mapping,
}

/// A declarative installation procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub metadata: RecipeMetadata,
    pub install_steps: Vec<Step>,
    pub input_variables: Vec<VariableConfig>,
}

impl Recipe {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

// ── Document schema ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDocument {
    #[serde(default)]
    description: String,
    #[serde(default)]
    process_match: Vec<PatternDocument>,
    #[serde(default)]
    input_vars: Vec<VariableConfig>,
    #[serde(default, alias = "validationURL")]
    validation_url: Option<String>,
    #[serde(default)]
    ports: Vec<u16>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternDocument {
    Substring(String),
    Glob { glob: String },
    Regex { regex: String },
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse every recipe document in `text`.
///
/// `origin` names the source in error messages (usually a file path).
///
/// # Errors
///
/// Returns `RecipeLoadError` on YAML syntax errors, a document that is not a
/// mapping, a missing `name`, a malformed `install` list, invalid patterns,
/// or a duplicate recipe name within `text`.
pub fn parse_recipes(origin: &str, text: &str) -> Result<Vec<Recipe>, RecipeLoadError> {
    let mut recipes: Vec<Recipe> = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(document).map_err(|e| RecipeLoadError::Malformed {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_null() {
            continue;
        }
        let recipe = parse_recipe_value(origin, index, value)?;
        if recipes.iter().any(|r| r.name() == recipe.name()) {
            return Err(RecipeLoadError::Duplicate(recipe.metadata.name));
        }
        recipes.push(recipe);
    }
    Ok(recipes)
}

fn parse_recipe_value(origin: &str, index: usize, value: Value) -> Result<Recipe, RecipeLoadError> {
    let Value::Mapping(mut mapping) = value else {
        return Err(RecipeLoadError::Malformed {
            origin: origin.to_string(),
            reason: format!("document {} is not a mapping", index + 1),
        });
    };

    let name = match mapping.get("name").and_then(Value::as_str).map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            return Err(RecipeLoadError::Invalid {
                recipe: format!("{origin}#{}", index + 1),
                reason: "missing required field 'name'".to_string(),
            });
        }
    };
    let invalid = |reason: String| RecipeLoadError::Invalid {
        recipe: name.clone(),
        reason,
    };

    let install = mapping.remove("install");
    let document: RecipeDocument =
        serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| invalid(e.to_string()))?;

    let install_steps = parse_steps(install).map_err(invalid)?;

    let process_match = document
        .process_match
        .into_iter()
        .map(|p| match p {
            PatternDocument::Substring(s) if s.is_empty() => {
                Err("empty processMatch pattern".to_string())
            }
            PatternDocument::Substring(s) => Ok(ProcessMatcher::substring(&s)),
            PatternDocument::Glob { glob } => {
                ProcessMatcher::glob(&glob).map_err(|e| format!("invalid glob '{glob}': {e}"))
            }
            PatternDocument::Regex { regex } => {
                ProcessMatcher::regex(&regex).map_err(|e| format!("invalid regex '{regex}': {e}"))
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid)?;

    let mut seen = HashSet::new();
    for var in &document.input_vars {
        if var.name.trim().is_empty() {
            return Err(invalid("input variable with empty name".to_string()));
        }
        if !seen.insert(var.name.as_str()) {
            return Err(invalid(format!("input variable '{}' declared twice", var.name)));
        }
    }

    Ok(Recipe {
        metadata: RecipeMetadata {
            name,
            description: document.description,
            process_match,
            validation_url: document.validation_url,
            ports: document.ports,
        },
        install_steps,
        input_variables: document.input_vars,
    })
}

fn parse_steps(install: Option<Value>) -> Result<Vec<Step>, String> {
    let Some(install) = install else {
        return Err("missing required field 'install'".to_string());
    };
    let Value::Sequence(items) = install else {
        return Err("'install' must be a list of steps".to_string());
    };
    if items.is_empty() {
        return Err("'install' must declare at least one step".to_string());
    }

    let mut steps: Vec<Step> = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let Value::Mapping(mut body) = item else {
            return Err(format!("install step {} is not a mapping", i + 1));
        };
        let name = match body.remove("name") {
            Some(Value::String(n)) if !n.trim().is_empty() => n.trim().to_string(),
            _ => return Err(format!("install step {} has no name", i + 1)),
        };
        if steps.iter().any(|s| s.name == name) {
            return Err(format!("install step '{name}' declared twice"));
        }
        steps.push(Step { name, body });
    }
    Ok(steps)
}
