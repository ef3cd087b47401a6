//! Provider credential lifecycle.
//!
//! The gate is either `Unset` or `Set`. A non-blank submission moves it to
//! `Set`; a rejected credential reported by the provider moves it back to
//! `Unset` and removes it from storage.

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::{config::Config, error::LookupError, model::LookupQuery};

/// Persistent slot holding the raw credential string.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&mut self, credential: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Keeps the credential in the `api_key` field of the config file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the platform config file.
    pub fn platform() -> Result<Self> {
        Ok(Self::new(Config::config_file_path()?))
    }

    fn update(&self, api_key: Option<String>) -> Result<()> {
        let mut cfg = Config::load_from(&self.path)?;
        cfg.api_key = api_key;
        cfg.save_to(&self.path)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(Config::load_from(&self.path)?.api_key)
    }

    fn save(&mut self, credential: &str) -> Result<()> {
        self.update(Some(credential.to_string()))
    }

    fn clear(&mut self) -> Result<()> {
        self.update(None)
    }
}

/// Non-persistent store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    value: Option<String>,
}

impl MemoryCredentialStore {
    pub fn with(credential: impl Into<String>) -> Self {
        Self { value: Some(credential.into()) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, credential: &str) -> Result<()> {
        self.value = Some(credential.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Please enter a valid key")]
    Empty,

    #[error("Failed to store credential: {0}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Unset,
    Set,
}

/// What the host should do right after startup.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupAction {
    PromptForCredential,
    Lookup(LookupQuery),
}

#[derive(Debug)]
pub struct CredentialGate<S> {
    store: S,
    credential: Option<String>,
}

impl<S: CredentialStore> CredentialGate<S> {
    /// Reads the stored credential. Blank stored values count as absent.
    pub fn open(store: S) -> Result<Self> {
        let credential = store.load()?.filter(|c| !c.trim().is_empty());
        Ok(Self { store, credential })
    }

    pub fn state(&self) -> CredentialState {
        match self.credential {
            Some(_) => CredentialState::Set,
            None => CredentialState::Unset,
        }
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn startup(&self, default_city: &str) -> StartupAction {
        match self.state() {
            CredentialState::Unset => StartupAction::PromptForCredential,
            CredentialState::Set => StartupAction::Lookup(LookupQuery::by_name(default_city)),
        }
    }

    /// Accepts user input. Surrounding whitespace is trimmed and blank input
    /// is rejected without touching the stored value.
    pub fn submit(&mut self, input: &str) -> Result<(), CredentialError> {
        let key = input.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }

        self.store.save(key)?;
        self.credential = Some(key.to_string());
        info!("credential stored");
        Ok(())
    }

    /// Removes the credential from memory and storage. The in-memory state is
    /// `Unset` afterwards even when clearing storage fails.
    pub fn evict(&mut self) -> Result<()> {
        self.credential = None;
        info!("credential evicted");
        self.store.clear()
    }

    /// Evicts when the provider rejected the credential. Returns whether the
    /// host has to restart the acquisition flow.
    pub fn observe(&mut self, error: &LookupError) -> Result<bool> {
        if error.evicts_credential() {
            self.evict()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
