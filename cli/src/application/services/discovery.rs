//! Application service — process discovery and host manifest building.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::{HostFactsProvider, ProcessTable, RawHostFacts};
use crate::domain::manifest::platform_family;
use crate::domain::{DiscoveryError, HostFacts, HostManifest, ProcessInfo};

/// Enumerate processes, skipping entries that could not be read.
///
/// Processes are returned ordered by pid so that repeated scans of an
/// unchanged host produce the same manifest.
///
/// # Errors
///
/// Returns `DiscoveryError` if the process table cannot be opened.
pub fn discover(table: &impl ProcessTable) -> Result<Vec<ProcessInfo>, DiscoveryError> {
    let probes = table.list_processes()?;
    let mut skipped = 0usize;
    let mut processes: Vec<ProcessInfo> = probes
        .into_iter()
        .filter_map(|probe| match probe {
            Ok(p) => Some(p),
            Err(failure) => {
                skipped += 1;
                tracing::debug!(pid = failure.pid, reason = %failure.reason, "skipping process");
                None
            }
        })
        .collect();
    processes.sort_by_key(|p| p.pid);
    tracing::debug!(found = processes.len(), skipped, "process discovery complete");
    Ok(processes)
}

/// Build the host manifest: platform facts plus one discovery pass.
///
/// Facts that cannot be determined become empty strings.
///
/// # Errors
///
/// Returns `DiscoveryError` if the process table cannot be opened.
pub fn build_manifest(
    facts: &impl HostFactsProvider,
    table: &impl ProcessTable,
) -> Result<HostManifest, DiscoveryError> {
    let host = host_facts(facts.current_host_facts());
    let processes = discover(table)?;
    tracing::info!(
        os = %host.os,
        platform = %host.platform,
        processes = processes.len(),
        "host manifest built",
    );
    Ok(HostManifest::new(host, processes))
}

fn host_facts(raw: RawHostFacts) -> HostFacts {
    fn or_empty(name: &str, value: Option<String>) -> String {
        value.unwrap_or_else(|| {
            tracing::warn!(fact = name, "host fact unavailable");
            String::new()
        })
    }

    let family = raw.platform_family.or_else(|| {
        raw.platform
            .as_deref()
            .and_then(platform_family)
            .map(str::to_string)
    });

    HostFacts {
        os: or_empty("os", raw.os),
        platform: or_empty("platform", raw.platform),
        platform_family: or_empty("platformFamily", family),
        platform_version: or_empty("platformVersion", raw.platform_version),
        kernel_arch: or_empty("kernelArch", raw.kernel_arch),
        kernel_version: or_empty("kernelVersion", raw.kernel_version),
    }
}
