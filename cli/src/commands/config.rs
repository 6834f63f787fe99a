//! `newrelic config` — show and change configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show every setting and its value
    List,
    /// Show one setting
    Get {
        /// Setting name
        key: String,
    },
    /// Change a setting
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
    /// Revert a setting to its default
    Delete {
        /// Setting name
        key: String,
    },
}

/// Run the config command.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::List => {
            if !app.is_json() && !app.output.quiet {
                let path = app.config_store.path()?;
                app.output.header(&format!("Configuration ({})", path.display()));
            }
            let settings = config_service::list_settings(&app.config, &app.config_dir);
            app.renderer().render_settings(&settings)?;
        }
        ConfigCommand::Get { key } => {
            let value = config_service::get_setting(&app.config, &key, &app.config_dir)?;
            app.renderer().render_settings(&[value])?;
        }
        ConfigCommand::Set { key, value } => {
            let stored = config_service::set_setting(&app.config_store, &key, &value)?;
            report_change(app, &key, &stored, "Set")?;
        }
        ConfigCommand::Delete { key } => {
            let default =
                config_service::delete_setting(&app.config_store, &key, &app.config_dir)?;
            report_change(app, &key, &default, "Reverted")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report_change(app: &AppContext, key: &str, value: &str, verb: &str) -> Result<()> {
    if app.is_json() {
        let doc = config_service::load_config(&app.config_store)?;
        let current = config_service::get_setting(&doc, key, &app.config_dir)?;
        app.renderer().render_settings(&[current])
    } else {
        app.output.success(&format!("{verb} {} = {value}", key.to_ascii_lowercase()));
        Ok(())
    }
}
