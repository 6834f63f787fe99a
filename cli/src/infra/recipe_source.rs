//! Infrastructure implementation of the `RecipeSourceReader` port.

use std::path::Path;

use crate::application::ports::{RecipeSourceReader, SourceDocument};
use crate::domain::{RecipeLoadError, RecipeSource};

/// Reads recipe files from the local filesystem.
pub struct FsRecipeReader;

impl RecipeSourceReader for FsRecipeReader {
    fn read(&self, source: &RecipeSource) -> Result<Vec<SourceDocument>, RecipeLoadError> {
        match source {
            RecipeSource::File(path) => Ok(vec![read_file(path)?]),
            RecipeSource::Directory(dir) => {
                let entries = std::fs::read_dir(dir).map_err(|e| unreadable(dir, &e))?;
                let mut paths = Vec::new();
                for entry in entries {
                    let path = entry.map_err(|e| unreadable(dir, &e))?.path();
                    if path.is_file() && is_recipe_file(&path) {
                        paths.push(path);
                    }
                }
                paths.sort();
                tracing::debug!(dir = %dir.display(), files = paths.len(), "scanned recipe directory");
                paths.iter().map(|p| read_file(p)).collect()
            }
        }
    }
}

fn is_recipe_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"))
}

fn read_file(path: &Path) -> Result<SourceDocument, RecipeLoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| unreadable(path, &e))?;
    Ok(SourceDocument {
        origin: path.display().to_string(),
        text,
    })
}

fn unreadable(path: &Path, e: &std::io::Error) -> RecipeLoadError {
    RecipeLoadError::Unreadable {
        origin: path.display().to_string(),
        reason: e.to_string(),
    }
}
