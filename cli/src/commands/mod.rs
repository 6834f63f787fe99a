//! Command implementations

pub mod config;
pub mod discover;
pub mod install;
pub mod profile;
pub mod recipe;
pub mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::recipe_repository::{self, LoadedRepository};
use crate::domain::RecipeSource;
use crate::infra::recipe_source::FsRecipeReader;

/// Where recipes are loaded from. The first source given is the primary one.
#[derive(Args, Debug, Clone, Default)]
pub struct RecipeSourceArgs {
    /// Recipe file to load (repeatable)
    #[arg(long = "recipe-file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Directory of *.yml / *.yaml recipe files
    #[arg(long = "recipe-dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl RecipeSourceArgs {
    /// Sources in load order: files as given, then the directory.
    #[must_use]
    pub fn sources(&self) -> Vec<RecipeSource> {
        self.files
            .iter()
            .cloned()
            .map(RecipeSource::File)
            .chain(self.dir.iter().cloned().map(RecipeSource::Directory))
            .collect()
    }
}

/// Load the repository, warning about skipped secondary sources.
fn load_recipes(app: &AppContext, args: &RecipeSourceArgs) -> Result<LoadedRepository> {
    let loaded = recipe_repository::load_repository(&FsRecipeReader, &args.sources())?;
    for skipped in &loaded.skipped {
        app.output
            .warn(&format!("Skipped recipe source {}: {}", skipped.source, skipped.error));
    }
    Ok(loaded)
}
