//! Remembered manual-entry draft
//!
//! The manual entry form can remember the url it last stored, so the next
//! time it opens it comes back pre-filled with that entry.

use crate::config::{BackendError, SettingsBackend};
use crate::core::types::{CredentialEntry, StoredEntry};
use crate::store::CredentialStore;

/// Settings key holding the remembered url
pub const LAST_URL_KEY: &str = "manualCreds.lastUrl";

impl<B: SettingsBackend> CredentialStore<B> {
    pub fn remember_draft(&mut self, url: &str) -> Result<(), BackendError> {
        self.backend_mut().set(LAST_URL_KEY, Some(url))
    }

    pub fn forget_draft(&mut self) -> Result<(), BackendError> {
        self.backend_mut().set(LAST_URL_KEY, None)
    }

    /// The remembered url, if any.
    pub fn last_draft_url(&self) -> Result<Option<String>, BackendError> {
        Ok(self.backend().get(LAST_URL_KEY)?.filter(|url| !url.is_empty()))
    }

    /// The remembered url with whatever is stored for it now.
    ///
    /// Fields stay `None` when missing or undecodable, and both are `None`
    /// when the entry was deleted since it was remembered.
    pub fn draft_entry(&self) -> Result<Option<StoredEntry>, BackendError> {
        let Some(url) = self.last_draft_url()? else {
            return Ok(None);
        };

        Ok(Some(self.get(&url)?.unwrap_or(StoredEntry {
            url,
            username: None,
            password: None,
        })))
    }

    /// Like [`draft_entry`], with missing fields left blank.
    ///
    /// [`draft_entry`]: CredentialStore::draft_entry
    pub fn recall_draft(&self) -> Result<Option<CredentialEntry>, BackendError> {
        Ok(self.draft_entry()?.map(StoredEntry::into_entry))
    }
}
