//! In-memory recipe repository with unique names and stable load order.

use std::collections::HashSet;

use crate::domain::error::{RecipeLoadError, SelectionError};
use crate::domain::recipe::Recipe;

/// Recipes loaded for one invocation, in load order. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct RecipeRepository {
    recipes: Vec<Recipe>,
}

impl RecipeRepository {
    /// Build a repository, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns `RecipeLoadError::Duplicate` naming the first repeated recipe.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self, RecipeLoadError> {
        let mut repo = Self::default();
        repo.extend(recipes)?;
        Ok(repo)
    }

    /// Append recipes from another source.
    ///
    /// Either every recipe is appended or none is.
    ///
    /// # Errors
    ///
    /// Returns `RecipeLoadError::Duplicate` if any name already exists or
    /// repeats within `recipes`.
    pub fn extend(&mut self, recipes: Vec<Recipe>) -> Result<(), RecipeLoadError> {
        let mut names: HashSet<&str> = self.recipes.iter().map(Recipe::name).collect();
        for recipe in &recipes {
            if !names.insert(recipe.name()) {
                return Err(RecipeLoadError::Duplicate(recipe.name().to_string()));
            }
        }
        self.recipes.extend(recipes);
        Ok(())
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Select recipes by explicit name, in repository order.
    ///
    /// Repeated names select a recipe once.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::UnknownRecipe` for the first name that does
    /// not exist.
    pub fn select(&self, names: &[String]) -> Result<Vec<&Recipe>, SelectionError> {
        if let Some(unknown) = names.iter().find(|n| self.get(n).is_none()) {
            return Err(SelectionError::UnknownRecipe(unknown.clone()));
        }
        Ok(self
            .recipes
            .iter()
            .filter(|r| names.iter().any(|n| n == r.name()))
            .collect())
    }
}
