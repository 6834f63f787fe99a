//! JSON renderer and machine-readable views.
//!
//! Everything printed here is a single pretty-printed JSON document on
//! stdout. Failures print the error object from [`format_error`].

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::install::InstallReport;
use crate::domain::credentials::mask_secret;
use crate::domain::{ConfigValue, Credentials, HostManifest, ProcessInfo, Recipe};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Recipe as shown by `recipe list --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub process_match: Vec<String>,
    pub steps: Vec<&'a str>,
    pub input_vars: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_url: Option<&'a str>,
    #[serde(skip_serializing_if = "<[u16]>::is_empty")]
    pub ports: &'a [u16],
}

impl<'a> From<&'a Recipe> for RecipeView<'a> {
    fn from(r: &'a Recipe) -> Self {
        Self {
            name: r.name(),
            description: &r.metadata.description,
            process_match: r.metadata.process_match.iter().map(ToString::to_string).collect(),
            steps: r.install_steps.iter().map(|s| s.name.as_str()).collect(),
            input_vars: r.input_variables.iter().map(|v| v.name.as_str()).collect(),
            validation_url: r.metadata.validation_url.as_deref(),
            ports: &r.metadata.ports,
        }
    }
}

/// Candidate as shown by `recipe match --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_process: Option<&'a ProcessInfo>,
}

/// Profile as shown by `profile list --json`; secrets are masked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView<'a> {
    pub name: &'a str,
    pub is_default: bool,
    pub region: &'a str,
    pub account_id: i64,
    pub license_key: String,
    pub api_key: String,
}

/// Build the masked profile listing.
#[must_use]
pub fn profile_views(creds: &Credentials) -> Vec<ProfileView<'_>> {
    creds
        .profiles
        .iter()
        .map(|(name, p)| ProfileView {
            name,
            is_default: creds.default_profile.as_deref() == Some(name.as_str()),
            region: &p.region,
            account_id: p.account_id,
            license_key: mask_secret(&p.license_key),
            api_key: mask_secret(&p.api_key),
        })
        .collect()
}

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{text}");
        Ok(())
    }

    /// Render the install report.
    pub fn render_report(&self, report: &InstallReport) -> Result<()> {
        Self::print(report)
    }

    /// Render loaded recipes.
    pub fn render_recipes(&self, recipes: &[Recipe]) -> Result<()> {
        let views: Vec<RecipeView<'_>> = recipes.iter().map(RecipeView::from).collect();
        Self::print(&views)
    }

    /// Render matched candidates.
    pub fn render_candidates(&self, candidates: &[(&Recipe, Option<&ProcessInfo>)]) -> Result<()> {
        let views: Vec<CandidateView<'_>> = candidates
            .iter()
            .map(|(r, p)| CandidateView {
                name: r.name(),
                matched_process: *p,
            })
            .collect();
        Self::print(&views)
    }

    /// Render the host manifest.
    pub fn render_manifest(&self, manifest: &HostManifest) -> Result<()> {
        Self::print(manifest)
    }

    /// Render configuration settings.
    pub fn render_settings(&self, settings: &[ConfigValue]) -> Result<()> {
        Self::print(&settings)
    }

    /// Render configured profiles.
    pub fn render_profiles(&self, creds: &Credentials) -> Result<()> {
        Self::print(&profile_views(creds))
    }

    /// Render version information.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }
}
