use anyhow::{Context, Result};
use keyring::{Entry, Error as KeyringError};
use tracing::debug;

const DEFAULT_SERVICE: &str = "nola-admin";

/// Administrator passwords in the OS keychain, keyed by username.
///
/// A missing entry is not an error: lookups return `None` and removal
/// reports whether anything was there.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl CredentialStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, username: &str) -> Result<Entry> {
        Entry::new(&self.service, username).context("Failed to open keychain entry")
    }

    pub fn store(&self, username: &str, password: &str) -> Result<()> {
        self.entry(username)?
            .set_password(password)
            .context("Failed to store password in keychain")?;
        debug!(username = %username, "Saved password to keychain");
        Ok(())
    }

    /// The saved password for `username`, if any.
    pub fn password(&self, username: &str) -> Result<Option<String>> {
        match self.entry(username)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read password from keychain"),
        }
    }

    /// Remove the saved password. Returns whether one existed.
    pub fn forget(&self, username: &str) -> Result<bool> {
        match self.entry(username)?.delete_credential() {
            Ok(()) => Ok(true),
            Err(KeyringError::NoEntry) => Ok(false),
            Err(e) => Err(e).context("Failed to delete password from keychain"),
        }
    }

    pub fn has_credentials(&self, username: &str) -> bool {
        matches!(self.password(username), Ok(Some(_)))
    }
}
