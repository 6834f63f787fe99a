//! Application service — configuration use-cases.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::{ConfigDocument, ConfigValue};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<ConfigDocument> {
    store.load()
}

/// Effective value of every setting.
pub fn list_settings(config: &ConfigDocument, config_dir: &Path) -> Vec<ConfigValue> {
    config.list(config_dir)
}

/// Effective value of one setting.
pub fn get_setting(config: &ConfigDocument, key: &str, config_dir: &Path) -> Result<ConfigValue> {
    Ok(config.get(key, config_dir)?)
}

/// Validate, store and persist a setting. Returns the canonical value.
pub fn set_setting(store: &impl ConfigStore, key: &str, value: &str) -> Result<String> {
    let mut config = store.load()?;
    let stored = config.set(key, value)?;
    store.save(&config)?;
    tracing::debug!(key, value = %stored, "setting saved");
    Ok(stored)
}

/// Revert a setting to its default and persist. Returns the default.
pub fn delete_setting(store: &impl ConfigStore, key: &str, config_dir: &Path) -> Result<String> {
    let mut config = store.load()?;
    let default = config.reset(key, config_dir)?;
    store.save(&config)?;
    tracing::debug!(key, value = %default, "setting reverted");
    Ok(default)
}
