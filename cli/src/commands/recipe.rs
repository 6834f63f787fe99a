//! `newrelic recipe` — inspect loaded recipes and host matches.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::commands::discover::build_host_manifest;
use crate::commands::{RecipeSourceArgs, load_recipes};
use crate::domain::{first_match, match_recipes};

/// Recipe subcommands.
#[derive(Subcommand)]
pub enum RecipeCommand {
    /// List recipes from the given sources
    List(RecipeSourceArgs),
    /// Show which recipes match this host, without installing
    Match(MatchArgs),
}

/// Arguments for `recipe match`.
#[derive(Args, Debug, Default)]
pub struct MatchArgs {
    #[command(flatten)]
    pub sources: RecipeSourceArgs,

    /// Only consider processes whose name or command line contains this (repeatable)
    #[arg(long = "process-filter", value_name = "SUBSTR")]
    pub process_filters: Vec<String>,
}

/// Run the recipe command.
pub fn run(app: &AppContext, cmd: RecipeCommand) -> Result<ExitCode> {
    match cmd {
        RecipeCommand::List(sources) => {
            let loaded = load_recipes(app, &sources)?;
            app.renderer().render_recipes(loaded.repository.recipes())?;
        }
        RecipeCommand::Match(args) => {
            let loaded = load_recipes(app, &args.sources)?;
            let manifest = build_host_manifest(app)?.filtered(&args.process_filters);
            let candidates: Vec<_> = match_recipes(&manifest, loaded.repository.recipes())
                .into_iter()
                .map(|r| (r, first_match(&manifest, r)))
                .collect();
            app.renderer().render_candidates(&candidates)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
