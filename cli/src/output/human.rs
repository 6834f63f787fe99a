//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::install::{InstallReport, RecipeOutcome};
use crate::domain::{ConfigValue, Credentials, HostManifest, ProcessInfo, Recipe};
use crate::output::OutputContext;
use crate::output::json::profile_views;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the per-recipe install summary.
    ///
    /// Failures are always shown, even when quiet.
    pub fn render_report(&self, report: &InstallReport) {
        if report.recipes.is_empty() {
            self.ctx.info("No recipes matched this host. Nothing to install.");
            return;
        }

        if !self.ctx.quiet {
            println!();
            self.ctx.header("Installation summary:");
        }
        for r in &report.recipes {
            match &r.outcome {
                RecipeOutcome::Installed => self.ctx.success(&format!("{:<24} installed", r.recipe)),
                RecipeOutcome::Failed { stage, reason, .. } => self
                    .ctx
                    .error(&format!("{:<24} failed ({stage}): {reason}", r.recipe)),
                RecipeOutcome::Skipped { reason } => {
                    if let Some(taskfile) = &r.taskfile {
                        println!();
                        println!("# {}", r.recipe.style(self.ctx.styles.bold));
                        print!("{taskfile}");
                    } else {
                        self.ctx.warn(&format!("{:<24} skipped: {reason}", r.recipe));
                    }
                }
            }
        }

        if report.cancelled {
            self.ctx.error("Installation cancelled");
        } else if !self.ctx.quiet {
            println!();
            self.ctx.kv(
                "Result:",
                &format!("{} installed, {} failed", report.installed(), report.failed()),
            );
        }
    }

    /// Render loaded recipes.
    pub fn render_recipes(&self, recipes: &[Recipe]) {
        if recipes.is_empty() {
            self.ctx.info("No recipes loaded.");
            return;
        }
        for r in recipes {
            let patterns = r
                .metadata
                .process_match
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {:<24} {}",
                r.name().style(self.ctx.styles.bold),
                r.metadata.description
            );
            if !patterns.is_empty() {
                println!("  {:<24} {}", "", format!("matches: {patterns}").style(self.ctx.styles.dim));
            }
        }
    }

    /// Render matched candidates and the process that selected each.
    pub fn render_candidates(&self, candidates: &[(&Recipe, Option<&ProcessInfo>)]) {
        if candidates.is_empty() {
            self.ctx.info("No recipes matched this host.");
            return;
        }
        for (recipe, process) in candidates {
            match process {
                Some(p) => println!(
                    "  {:<24} {}",
                    recipe.name().style(self.ctx.styles.bold),
                    format!("pid {} {}", p.pid, p.match_target()).style(self.ctx.styles.dim)
                ),
                None => println!("  {}", recipe.name().style(self.ctx.styles.bold)),
            }
        }
    }

    /// Render the host manifest.
    pub fn render_manifest(&self, manifest: &HostManifest) {
        let f = manifest.facts();
        self.ctx.header("Host:");
        self.ctx.kv("OS:              ", &f.os);
        self.ctx.kv("Platform:        ", &f.platform);
        self.ctx.kv("PlatformFamily:  ", &f.platform_family);
        self.ctx.kv("PlatformVersion: ", &f.platform_version);
        self.ctx.kv("KernelArch:      ", &f.kernel_arch);
        self.ctx.kv("KernelVersion:   ", &f.kernel_version);
        println!();
        self.ctx
            .header(&format!("Processes ({}):", manifest.processes().len()));
        for p in manifest.processes() {
            let ports = if p.listening_ports.is_empty() {
                String::new()
            } else {
                let list = p
                    .listening_ports
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                format!(" [{list}]")
            };
            println!(
                "  {:>7}  {:<20} {}{}",
                p.pid,
                p.name,
                p.command_line.style(self.ctx.styles.dim),
                ports
            );
        }
    }

    /// Render configuration settings.
    pub fn render_settings(&self, settings: &[ConfigValue]) {
        for s in settings {
            let marker = if s.is_default { " (default)" } else { "" };
            println!(
                "  {:<20} {}{}",
                s.name,
                s.value,
                marker.style(self.ctx.styles.dim)
            );
        }
    }

    /// Render configured profiles with masked secrets.
    pub fn render_profiles(&self, creds: &Credentials) {
        if creds.profiles.is_empty() {
            self.ctx.info(
                "No profiles configured. Add one: newrelic profile add --name <name> --license-key <key>",
            );
            return;
        }
        for v in profile_views(creds) {
            let marker = if v.is_default { " (default)" } else { "" };
            println!(
                "  {:<16} {:<6} {:<10} {}{}",
                v.name.style(self.ctx.styles.bold),
                v.region,
                v.account_id,
                v.license_key,
                marker.style(self.ctx.styles.dim)
            );
        }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("newrelic {version}");
    }
}
