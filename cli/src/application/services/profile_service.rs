//! Application service — credential profile management.
//!
//! These are the only writers of the credential store. The install pipeline
//! reads through a [`CredentialsHandle`] taken before it starts.

use anyhow::{Context, Result};

use crate::application::ports::{CredentialStore, CredentialsHandle};
use crate::domain::{Credentials, Profile};

/// Take a read-only credential snapshot for one pipeline run.
pub fn open_credentials(store: &impl CredentialStore) -> Result<CredentialsHandle> {
    store.open().context("failed to read credentials")
}

/// Add or replace a profile, optionally making it the default.
///
/// The first profile ever added becomes the default.
pub fn add_profile(
    store: &impl CredentialStore,
    name: &str,
    profile: Profile,
    make_default: bool,
) -> Result<()> {
    let mut creds = store.load()?;
    creds.upsert(name, profile)?;
    if make_default || creds.default_profile.is_none() {
        creds.set_default(name)?;
    }
    store.save(&creds)?;
    tracing::info!(profile = name, "profile saved");
    Ok(())
}

/// All profiles and the default profile name.
pub fn list_profiles(store: &impl CredentialStore) -> Result<Credentials> {
    store.load()
}

/// Make an existing profile the default.
pub fn set_default_profile(store: &impl CredentialStore, name: &str) -> Result<()> {
    let mut creds = store.load()?;
    creds.set_default(name)?;
    store.save(&creds)
}

/// Delete a profile. Deleting the default leaves no default set.
pub fn delete_profile(store: &impl CredentialStore, name: &str) -> Result<()> {
    let mut creds = store.load()?;
    creds.remove(name)?;
    store.save(&creds)?;
    tracing::info!(profile = name, "profile deleted");
    Ok(())
}
