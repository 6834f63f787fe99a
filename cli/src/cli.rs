//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Discover this host and install matching observability recipes
#[derive(Parser)]
#[command(
    name = "newrelic",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log level for diagnostics on stderr (overrides the loglevel setting)
    #[arg(
        long,
        global = true,
        ignore_case = true,
        value_parser = ["Info", "Debug", "Trace", "Warn", "Error"]
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Discover this host and install matching recipes
    Install(commands::install::InstallArgs),

    /// Inspect recipes
    #[command(subcommand)]
    Recipe(commands::recipe::RecipeCommand),

    /// Show host facts and running processes
    Discover(commands::discover::DiscoverArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Manage credential profiles
    #[command(subcommand)]
    Profile(commands::profile::ProfileCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// `cancel` fires on user interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails as a whole. Per-recipe install
    /// failures are reported through the exit code instead.
    pub async fn run(self, cancel: CancellationToken) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            log_level,
            command,
        } = self;

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
        })?;
        crate::logging::init(log_level.as_deref().unwrap_or(app.config.log_level()));

        match command {
            Command::Install(args) => commands::install::run(&app, args, &cancel).await,
            Command::Recipe(cmd) => commands::recipe::run(&app, cmd),
            Command::Discover(args) => commands::discover::run(&app, &args),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Profile(cmd) => commands::profile::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
