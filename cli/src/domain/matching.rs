//! Recipe matching: manifest × recipes → ordered candidate list.
//!
//! Pure and deterministic. Output preserves recipe load order and never
//! names a recipe twice.

use std::collections::HashSet;

use crate::domain::manifest::{HostManifest, ProcessInfo};
use crate::domain::recipe::Recipe;

/// Recipes whose process-match patterns match at least one process.
///
/// Recipes without patterns are never selected here; they can only be
/// chosen by name.
#[must_use]
pub fn match_recipes<'a>(manifest: &HostManifest, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let mut seen: HashSet<&str> = HashSet::new();
    recipes
        .iter()
        .filter(|r| first_match(manifest, r).is_some())
        .filter(|r| seen.insert(r.name()))
        .collect()
}

/// The first process (manifest order) matched by any of the recipe's
/// patterns, tried in declaration order.
#[must_use]
pub fn first_match<'m>(manifest: &'m HostManifest, recipe: &Recipe) -> Option<&'m ProcessInfo> {
    recipe.metadata.process_match.iter().find_map(|pattern| {
        manifest
            .processes()
            .iter()
            .find(|p| pattern.matches_process(p))
    })
}
