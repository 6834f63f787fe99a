//! Infrastructure implementation of the `CredentialStore` port.
//!
//! Profiles live in `credentials.json`; the default profile name lives in
//! `default-profile.json` as a JSON string.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::CredentialStore;
use crate::domain::credentials::parse_default_profile;
use crate::domain::{Credentials, Profile};
use crate::infra::fs::{read_optional, write_atomic};

const CREDENTIALS_FILE: &str = "credentials.json";
const DEFAULT_PROFILE_FILE: &str = "default-profile.json";

/// JSON-file credential store under the configuration directory.
pub struct JsonCredentialStore {
    dir: PathBuf,
}

impl JsonCredentialStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl CredentialStore for JsonCredentialStore {
    fn load(&self) -> Result<Credentials> {
        let path = self.dir.join(CREDENTIALS_FILE);
        let profiles: BTreeMap<String, Profile> = match read_optional(&path)? {
            Some(content) if !content.trim().is_empty() => serde_json::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?,
            _ => BTreeMap::new(),
        };

        let default_profile = read_optional(&self.dir.join(DEFAULT_PROFILE_FILE))?
            .and_then(|raw| parse_default_profile(&raw));

        tracing::debug!(profiles = profiles.len(), "credentials loaded");
        Ok(Credentials {
            profiles,
            default_profile,
        })
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        let content = serde_json::to_string_pretty(&credentials.profiles)
            .context("cannot serialize credentials")?;
        write_atomic(&self.dir.join(CREDENTIALS_FILE), &content)?;

        let default_path = self.dir.join(DEFAULT_PROFILE_FILE);
        match &credentials.default_profile {
            Some(name) => {
                let quoted = serde_json::to_string(name).context("cannot serialize profile name")?;
                write_atomic(&default_path, &quoted)
            }
            None => match std::fs::remove_file(&default_path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e).with_context(|| format!("removing {}", default_path.display())),
            },
        }
    }
}
