//! Infrastructure implementation of the `ProcessTable` port.
//!
//! Process names and command lines come from `sysinfo`. Listening ports are
//! best-effort: on Linux they are read from `/proc/net/{tcp,tcp6,udp,udp6}`
//! and joined to processes through socket inodes under `/proc/<pid>/fd`;
//! elsewhere the port set stays empty.

use std::collections::{BTreeSet, HashMap};

use sysinfo::System;

use crate::application::ports::{ProcessProbe, ProcessReadFailure, ProcessTable};
use crate::domain::{DiscoveryError, ProcessInfo};

/// Process table backed by `sysinfo`.
pub struct SysinfoProcessTable;

impl ProcessTable for SysinfoProcessTable {
    fn list_processes(&self) -> Result<Vec<ProcessProbe>, DiscoveryError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(DiscoveryError::Unsupported(std::env::consts::OS.to_string()));
        }

        let system = System::new_all();
        if system.processes().is_empty() {
            return Err(DiscoveryError::ProcessTableUnavailable(
                "no processes visible".to_string(),
            ));
        }

        let ports_by_inode = listening_sockets();

        let probes = system
            .processes()
            .iter()
            .filter(|(_, p)| p.thread_kind().is_none())
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                let name = process.name().to_string_lossy().into_owned();
                if name.is_empty() {
                    return Err(ProcessReadFailure {
                        pid,
                        reason: "process name unreadable".to_string(),
                    });
                }
                let command_line = process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(ProcessInfo {
                    pid,
                    name,
                    command_line,
                    listening_ports: ports_for(pid, &ports_by_inode),
                })
            })
            .collect();
        Ok(probes)
    }
}

/// A socket row from `/proc/net/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketEntry {
    pub inode: u64,
    pub port: u16,
}

/// TCP `LISTEN` state code in `/proc/net/tcp`.
const TCP_LISTEN: &str = "0A";
/// UDP "unconnected" state code; such sockets accept datagrams on the port.
const UDP_UNCONNECTED: &str = "07";

/// Parse the text of a `/proc/net/{tcp,tcp6,udp,udp6}` table, keeping
/// listening sockets only. Malformed rows are ignored.
#[must_use]
pub fn parse_proc_net(text: &str, udp: bool) -> Vec<SocketEntry> {
    let wanted_state = if udp { UDP_UNCONNECTED } else { TCP_LISTEN };
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 10 || cols[3] != wanted_state {
                return None;
            }
            let (_, port_hex) = cols[1].rsplit_once(':')?;
            let port = u16::from_str_radix(port_hex, 16).ok()?;
            let inode = cols[9].parse::<u64>().ok()?;
            (port != 0 && inode != 0).then_some(SocketEntry { inode, port })
        })
        .collect()
}

/// Parse a `/proc/<pid>/fd/*` link target of the form `socket:[12345]`.
#[must_use]
pub fn socket_inode(link: &str) -> Option<u64> {
    link.strip_prefix("socket:[")?.strip_suffix(']')?.parse().ok()
}

#[cfg(target_os = "linux")]
fn listening_sockets() -> HashMap<u64, u16> {
    let mut map = HashMap::new();
    for (table, udp) in [("tcp", false), ("tcp6", false), ("udp", true), ("udp6", true)] {
        let path = format!("/proc/net/{table}");
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                for entry in parse_proc_net(&text, udp) {
                    map.insert(entry.inode, entry.port);
                }
            }
            Err(e) => tracing::debug!(path, error = %e, "socket table unreadable"),
        }
    }
    map
}

#[cfg(not(target_os = "linux"))]
fn listening_sockets() -> HashMap<u64, u16> {
    HashMap::new()
}

#[cfg(target_os = "linux")]
fn ports_for(pid: u32, ports_by_inode: &HashMap<u64, u16>) -> BTreeSet<u16> {
    if ports_by_inode.is_empty() {
        return BTreeSet::new();
    }
    let Ok(entries) = std::fs::read_dir(format!("/proc/{pid}/fd")) else {
        return BTreeSet::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| std::fs::read_link(entry.path()).ok())
        .filter_map(|target| socket_inode(&target.to_string_lossy()))
        .filter_map(|inode| ports_by_inode.get(&inode).copied())
        .collect()
}

#[cfg(not(target_os = "linux"))]
fn ports_for(_pid: u32, _ports_by_inode: &HashMap<u64, u16>) -> BTreeSet<u16> {
    BTreeSet::new()
}
