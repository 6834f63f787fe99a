//! Host manifest: a point-in-time snapshot of host facts and running processes.
//!
//! Pure data — no I/O. The manifest is built once per invocation by the
//! discovery service and never mutated afterwards; narrowing it produces a
//! new manifest.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One process observed during a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    /// Host process-table identity. Not stable across discovery passes.
    pub pid: u32,
    /// Executable name as reported by the OS.
    pub name: String,
    /// Full command line, arguments joined by single spaces.
    pub command_line: String,
    /// TCP/UDP ports this process is listening on.
    #[serde(default)]
    pub listening_ports: BTreeSet<u16>,
}

impl ProcessInfo {
    /// The text process-match patterns are tested against.
    ///
    /// Falls back to the process name when the command line is empty
    /// (unreadable, or a kernel thread).
    #[must_use]
    pub fn match_target(&self) -> &str {
        if self.command_line.is_empty() {
            &self.name
        } else {
            &self.command_line
        }
    }
}

/// Static platform facts about the host.
///
/// A fact that could not be determined is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostFacts {
    pub os: String,
    pub platform: String,
    pub platform_family: String,
    pub platform_version: String,
    pub kernel_arch: String,
    pub kernel_version: String,
}

/// Immutable snapshot of one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostManifest {
    #[serde(flatten)]
    facts: HostFacts,
    processes: Vec<ProcessInfo>,
}

impl HostManifest {
    #[must_use]
    pub fn new(facts: HostFacts, processes: Vec<ProcessInfo>) -> Self {
        Self { facts, processes }
    }

    #[must_use]
    pub fn facts(&self) -> &HostFacts {
        &self.facts
    }

    /// Processes in discovery order.
    #[must_use]
    pub fn processes(&self) -> &[ProcessInfo] {
        &self.processes
    }

    /// Return a new manifest keeping only processes whose name or command
    /// line contains any of `filters`. An empty filter list keeps everything.
    #[must_use]
    pub fn filtered(&self, filters: &[String]) -> Self {
        if filters.is_empty() {
            return self.clone();
        }
        let processes = self
            .processes
            .iter()
            .filter(|p| {
                filters
                    .iter()
                    .any(|f| p.name.contains(f.as_str()) || p.command_line.contains(f.as_str()))
            })
            .cloned()
            .collect();
        Self {
            facts: self.facts.clone(),
            processes,
        }
    }
}

/// Map a platform identifier (distribution id) to its family.
///
/// Returns `None` for platforms with no known family.
#[must_use]
pub fn platform_family(platform: &str) -> Option<&'static str> {
    let family = match platform.to_ascii_lowercase().as_str() {
        "debian" | "ubuntu" | "linuxmint" | "raspbian" | "pop" | "elementary" => "debian",
        "oracle" | "ol" | "centos" | "redhat" | "rhel" | "scientific" | "amazon" | "amzn"
        | "xenserver" | "cloudlinux" | "rocky" | "almalinux" => "rhel",
        "fedora" => "fedora",
        "suse" | "opensuse" | "opensuse-leap" | "opensuse-tumbleweed" | "sles" | "sled" => "suse",
        "gentoo" => "gentoo",
        "arch" | "archlinux" | "manjaro" => "arch",
        "alpine" => "alpine",
        "coreos" => "coreos",
        "darwin" | "macos" => "darwin",
        _ => return None,
    };
    Some(family)
}
