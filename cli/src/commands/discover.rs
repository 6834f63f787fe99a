//! `newrelic discover` — print the host manifest.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::discovery;
use crate::domain::HostManifest;
use crate::infra::host_facts::SysinfoHostFacts;
use crate::infra::process_table::SysinfoProcessTable;
use crate::output::progress;

/// Arguments for the discover command.
#[derive(Args, Debug, Default)]
pub struct DiscoverArgs {
    /// Only show processes whose name or command line contains this (repeatable)
    #[arg(long = "process-filter", value_name = "SUBSTR")]
    pub process_filters: Vec<String>,
}

/// Run the discover command.
pub fn run(app: &AppContext, args: &DiscoverArgs) -> Result<ExitCode> {
    let manifest = build_host_manifest(app)?.filtered(&args.process_filters);
    app.renderer().render_manifest(&manifest)?;
    Ok(ExitCode::SUCCESS)
}

/// Build the manifest for this host, with a spinner on interactive terminals.
pub(crate) fn build_host_manifest(app: &AppContext) -> Result<HostManifest> {
    let pb = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner("Discovering host..."));
    let result = discovery::build_manifest(&SysinfoHostFacts, &SysinfoProcessTable);
    if let Some(pb) = pb {
        match &result {
            Ok(m) => progress::finish_ok(
                &pb,
                &format!("Discovered {} processes", m.processes().len()),
            ),
            Err(_) => progress::finish_clear(&pb),
        }
    }
    Ok(result?)
}
