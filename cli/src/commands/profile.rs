//! `newrelic profile` — manage credential profiles.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::profile_service;
use crate::domain::Profile;

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Add or replace a profile
    Add(AddProfileArgs),
    /// List profiles (secrets masked)
    List,
    /// Make a profile the default
    Default {
        /// Profile name
        name: String,
    },
    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Arguments for `profile add`.
#[derive(Args, Debug)]
pub struct AddProfileArgs {
    /// Profile name
    #[arg(long)]
    pub name: String,

    /// License key injected into recipes as NR_LICENSE_KEY
    #[arg(long)]
    pub license_key: String,

    /// User API key
    #[arg(long, default_value = "")]
    pub api_key: String,

    /// Insights insert key
    #[arg(long, default_value = "")]
    pub insights_insert_key: String,

    /// Account region (stored lowercase)
    #[arg(long, default_value = "us")]
    pub region: String,

    /// Account ID
    #[arg(long, default_value_t = 0)]
    pub account_id: i64,

    /// Make this the default profile
    #[arg(long)]
    pub default: bool,
}

/// Run the profile command.
pub fn run(app: &AppContext, cmd: ProfileCommand) -> Result<ExitCode> {
    let store = &app.credential_store;
    match cmd {
        ProfileCommand::Add(args) => {
            let profile = Profile {
                api_key: args.api_key,
                insights_insert_key: args.insights_insert_key,
                region: args.region,
                account_id: args.account_id,
                license_key: args.license_key,
            };
            profile_service::add_profile(store, &args.name, profile, args.default)?;
            app.output.success(&format!("Profile {} saved", args.name));
        }
        ProfileCommand::List => {
            let creds = profile_service::list_profiles(store)?;
            app.renderer().render_profiles(&creds)?;
        }
        ProfileCommand::Default { name } => {
            profile_service::set_default_profile(store, &name)?;
            app.output.success(&format!("Default profile set to {name}"));
        }
        ProfileCommand::Delete { name } => {
            profile_service::delete_profile(store, &name)?;
            app.output.success(&format!("Profile {name} deleted"));
        }
    }
    Ok(ExitCode::SUCCESS)
}
