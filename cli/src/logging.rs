//! Diagnostic logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the level comes from `--log-level`,
//! then from the `loglevel` setting.

use tracing_subscriber::EnvFilter;

use crate::domain::config::tracing_directive;

/// Install the global stderr subscriber. A second call is a no-op.
pub fn init(configured_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_directive(configured_level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
