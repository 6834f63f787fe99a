//! Infrastructure implementation of the `EnvSource` port.

use crate::application::ports::EnvSource;

/// Reads the real process environment. Non-UTF-8 values count as unset.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
