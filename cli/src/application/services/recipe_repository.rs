//! Application service — loading the recipe repository from its sources.
//!
//! The first source is primary: any failure there aborts the load. A failing
//! secondary source is skipped and reported back to the caller.

use crate::application::ports::RecipeSourceReader;
use crate::domain::{Recipe, RecipeLoadError, RecipeRepository, RecipeSource, parse_recipes};

/// A secondary source that failed to load.
#[derive(Debug)]
pub struct SkippedSource {
    pub source: RecipeSource,
    pub error: RecipeLoadError,
}

/// The loaded repository plus any secondary sources that were skipped.
#[derive(Debug)]
pub struct LoadedRepository {
    pub repository: RecipeRepository,
    pub skipped: Vec<SkippedSource>,
}

/// Read and parse every recipe from one source, in document order.
///
/// # Errors
///
/// Returns `RecipeLoadError` when the source cannot be read or any document
/// in it is invalid.
pub fn load_source(
    reader: &impl RecipeSourceReader,
    source: &RecipeSource,
) -> Result<Vec<Recipe>, RecipeLoadError> {
    let mut recipes = Vec::new();
    for document in reader.read(source)? {
        let parsed = parse_recipes(&document.origin, &document.text)?;
        tracing::debug!(origin = %document.origin, recipes = parsed.len(), "parsed recipe source");
        recipes.extend(parsed);
    }
    Ok(recipes)
}

/// Load all sources into one repository.
///
/// # Errors
///
/// Returns `RecipeLoadError` if the primary source fails to load, contains
/// duplicate names, or if no sources were given.
pub fn load_repository(
    reader: &impl RecipeSourceReader,
    sources: &[RecipeSource],
) -> Result<LoadedRepository, RecipeLoadError> {
    let Some((primary, secondary)) = sources.split_first() else {
        return Err(RecipeLoadError::Unreadable {
            origin: "(none)".to_string(),
            reason: "no recipe sources given".to_string(),
        });
    };

    let mut repository = RecipeRepository::from_recipes(load_source(reader, primary)?)?;
    let mut skipped = Vec::new();

    for source in secondary {
        let loaded = load_source(reader, source).and_then(|recipes| repository.extend(recipes));
        if let Err(error) = loaded {
            tracing::warn!(source = %source, error = %error, "skipping recipe source");
            skipped.push(SkippedSource {
                source: source.clone(),
                error,
            });
        }
    }

    tracing::info!(recipes = repository.len(), "recipe repository loaded");
    Ok(LoadedRepository {
        repository,
        skipped,
    })
}
