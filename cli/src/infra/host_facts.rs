//! Infrastructure implementation of the `HostFactsProvider` port.

use sysinfo::System;

use crate::application::ports::{HostFactsProvider, RawHostFacts};

/// Platform facts from `sysinfo` and the compile target.
pub struct SysinfoHostFacts;

impl HostFactsProvider for SysinfoHostFacts {
    fn current_host_facts(&self) -> RawHostFacts {
        let platform = Some(System::distribution_id()).filter(|id| !id.is_empty());
        RawHostFacts {
            os: Some(std::env::consts::OS.to_string()),
            platform,
            // Derived from the platform by the manifest builder.
            platform_family: None,
            platform_version: System::os_version(),
            kernel_arch: Some(std::env::consts::ARCH.to_string()),
            kernel_version: System::kernel_version(),
        }
    }
}
