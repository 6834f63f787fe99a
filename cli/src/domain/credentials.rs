//! Credential profiles.
//!
//! Pure data and lookups. Persistence lives in `infra::credentials`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::CredentialError;

/// One named set of account credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub insights_insert_key: String,
    /// Stored lowercase.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, rename = "accountID", skip_serializing_if = "is_zero")]
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license_key: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if signature
fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// All profiles plus the name of the default one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub profiles: BTreeMap<String, Profile>,
    pub default_profile: Option<String>,
}

impl Credentials {
    /// Name of the profile to use: `requested` if given, else the default.
    ///
    /// # Errors
    ///
    /// Returns `ProfileNotFound` if the chosen profile does not exist, or
    /// `NoDefaultProfile` if nothing was requested and no default is set.
    pub fn active_profile<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, CredentialError> {
        let name = requested
            .or(self.default_profile.as_deref())
            .ok_or(CredentialError::NoDefaultProfile)?;
        if !self.profiles.contains_key(name) {
            return Err(CredentialError::ProfileNotFound(name.to_string()));
        }
        Ok(name)
    }

    /// License key of `profile`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileNotFound` or `MissingLicenseKey`.
    pub fn license_key(&self, profile: &str) -> Result<&str, CredentialError> {
        let p = self
            .profiles
            .get(profile)
            .ok_or_else(|| CredentialError::ProfileNotFound(profile.to_string()))?;
        if p.license_key.is_empty() {
            return Err(CredentialError::MissingLicenseKey(profile.to_string()));
        }
        Ok(&p.license_key)
    }

    /// Insert or replace a profile. Region is lowercased.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for an empty name or one containing whitespace.
    pub fn upsert(&mut self, name: &str, mut profile: Profile) -> Result<(), CredentialError> {
        validate_profile_name(name)?;
        profile.region = profile.region.to_lowercase();
        self.profiles.insert(name.to_string(), profile);
        Ok(())
    }

    /// Remove a profile, clearing the default if it pointed at it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileNotFound` if no such profile exists.
    pub fn remove(&mut self, name: &str) -> Result<Profile, CredentialError> {
        let removed = self
            .profiles
            .remove(name)
            .ok_or_else(|| CredentialError::ProfileNotFound(name.to_string()))?;
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        Ok(removed)
    }

    /// Make `name` the default profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileNotFound` if no such profile exists.
    pub fn set_default(&mut self, name: &str) -> Result<(), CredentialError> {
        if !self.profiles.contains_key(name) {
            return Err(CredentialError::ProfileNotFound(name.to_string()));
        }
        self.default_profile = Some(name.to_string());
        Ok(())
    }
}

/// Validate a profile name.
///
/// # Errors
///
/// Returns `CredentialError::InvalidName` for an empty name or one containing
/// whitespace.
pub fn validate_profile_name(name: &str) -> Result<(), CredentialError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(CredentialError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Parse the contents of `default-profile.json`: a JSON string, tolerating a
/// bare unquoted name. Empty contents mean no default.
#[must_use]
pub fn parse_default_profile(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let name = serde_json::from_str::<String>(trimmed)
        .unwrap_or_else(|_| trimmed.trim_matches('"').to_string());
    if name.is_empty() { None } else { Some(name) }
}

/// Mask all but the last four characters of a secret.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
