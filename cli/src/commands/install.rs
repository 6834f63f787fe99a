//! `newrelic install` — discover, match, resolve and execute recipes.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::app::AppContext;
use crate::application::services::execute::Executor;
use crate::application::services::install::{InstallOptions, InstallReport, Installer};
use crate::application::services::profile_service;
use crate::application::services::resolve::{Resolver, SerializedPrompter};
use crate::commands::discover::build_host_manifest;
use crate::commands::{RecipeSourceArgs, load_recipes};
use crate::domain::{Recipe, ResolveMode, match_recipes};
use crate::infra::env::ProcessEnv;
use crate::infra::prompt::TerminalPrompter;
use crate::infra::task_engine::{GoTaskEngine, TempTaskfiles};
use crate::output::TerminalReporter;

/// Exit code reported when the user interrupts the run.
pub const EXIT_CANCELLED: u8 = 130;

/// Arguments for the install command.
#[derive(Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub sources: RecipeSourceArgs,

    /// Install this recipe without matching (repeatable)
    #[arg(long = "recipe", value_name = "NAME")]
    pub recipes: Vec<String>,

    /// Only match processes whose name or command line contains this (repeatable)
    #[arg(long = "process-filter", value_name = "SUBSTR")]
    pub process_filters: Vec<String>,

    /// Never prompt; variables must come from the environment
    #[arg(long)]
    pub non_interactive: bool,

    /// In non-interactive mode, use declared defaults for unset variables
    #[arg(long)]
    pub accept_defaults: bool,

    /// Credential profile supplying the license key (default: the default profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// Number of recipes installed at once
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub concurrency: u8,

    /// Task engine binary
    #[arg(long, env = "NEW_RELIC_CLI_TASK_BIN", default_value = "task")]
    pub task_bin: PathBuf,

    /// Resolve variables and print each rendered task file without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the install command.
pub async fn run(
    app: &AppContext,
    args: InstallArgs,
    cancel: &CancellationToken,
) -> Result<ExitCode> {
    let loaded = load_recipes(app, &args.sources)?;
    let manifest = build_host_manifest(app)?.filtered(&args.process_filters);

    let candidates: Vec<&Recipe> = if args.recipes.is_empty() {
        match_recipes(&manifest, loaded.repository.recipes())
    } else {
        loaded.repository.select(&args.recipes)?
    };

    if candidates.is_empty() {
        let report = InstallReport::default();
        app.renderer().render_report(&report)?;
        return Ok(exit_code(&report));
    }

    let credentials = profile_service::open_credentials(&app.credential_store)?;
    let profile = credentials.active_profile(args.profile.as_deref())?;

    let mode = if args.non_interactive || app.non_interactive {
        ResolveMode::NonInteractive {
            accept_defaults: args.accept_defaults,
        }
    } else {
        ResolveMode::Interactive
    };
    tracing::debug!(?mode, profile = %profile, "resolving recipes");

    let env = ProcessEnv;
    let prompter = SerializedPrompter::new(TerminalPrompter);
    let writer = TempTaskfiles;
    let engine = GoTaskEngine::new(args.task_bin).stdout_to_stderr(app.is_json());
    let reporter = TerminalReporter::new(&app.output);

    let installer = Installer {
        resolver: Resolver {
            env: &env,
            prompter: &prompter,
            credentials: &credentials,
            profile: &profile,
            mode,
        },
        executor: Executor {
            writer: &writer,
            engine: &engine,
        },
        reporter: &reporter,
        options: InstallOptions {
            concurrency: usize::from(args.concurrency),
            dry_run: args.dry_run,
        },
    };

    let report = installer.run(&candidates, &manifest, cancel).await;
    app.renderer().render_report(&report)?;
    Ok(exit_code(&report))
}

/// `0` when everything installed, `130` when cancelled, `1` otherwise.
#[must_use]
pub fn exit_code(report: &InstallReport) -> ExitCode {
    if report.cancelled {
        ExitCode::from(EXIT_CANCELLED)
    } else if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
