//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::ConfigDocument;
use crate::infra::fs::{read_optional, write_atomic};

/// Production implementation of `ConfigStore` backed by
/// `<config dir>/config.json`.
pub struct JsonConfigStore {
    dir: PathBuf,
}

impl JsonConfigStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<ConfigDocument> {
        let path = self.path()?;
        let Some(content) = read_optional(&path)? else {
            return Ok(ConfigDocument::default());
        };
        if content.trim().is_empty() {
            return Ok(ConfigDocument::default());
        }
        serde_json::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &ConfigDocument) -> Result<()> {
        let path = self.path()?;
        let content = serde_json::to_string_pretty(config).context("cannot serialize config")?;
        write_atomic(&path, &content)
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(self.dir.join("config.json"))
    }
}
