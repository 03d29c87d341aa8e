// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Credential entries on top of a settings backend.
//!
//! Every entry is two backend keys, `{url}!username` and `{url}!password`.
//! The password key holds the encoded form. The two keys are written one
//! after the other, never atomically, so a failed write can leave an entry
//! with only one of them. Such half entries are still listed and can be
//! read, edited and deleted.
//!
//! # Example
//!
//! ```
//! use teamcreds::config::MemoryBackend;
//! use teamcreds::core::CredentialEntry;
//! use teamcreds::store::CredentialStore;
//!
//! let mut store = CredentialStore::new(MemoryBackend::new());
//! store.upsert(&CredentialEntry::new("http://example.com", "bob", "s3cret"))?;
//!
//! let entry = store.get("http://example.com")?.unwrap();
//! assert_eq!(entry.password.as_deref(), Some("s3cret"));
//! # Ok::<(), teamcreds::config::BackendError>(())
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::{BackendError, SettingsBackend};
use crate::core::types::{backend_key, split_backend_key, CredentialEntry, Field, StoredEntry};
use crate::core::validator::UrlLookup;
use crate::core::{decode_password, encode_password};

pub mod draft;
pub mod error;
pub mod export;
pub mod import;

pub use draft::LAST_URL_KEY;
pub use error::StoreError;
pub use import::{group_pairs, ImportGroup};

/// CRUD over credential entries.
#[derive(Debug)]
pub struct CredentialStore<B> {
    backend: B,
}

impl<B: SettingsBackend> CredentialStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Reads the stored state of `url`.
    ///
    /// Returns `None` when neither key is present. A password that fails to
    /// decode is logged and reported as missing.
    pub fn get(&self, url: &str) -> Result<Option<StoredEntry>, BackendError> {
        let username = self.raw_field(url, Field::Username)?;
        let stored_password = self.raw_field(url, Field::Password)?;

        if username.is_none() && stored_password.is_none() {
            return Ok(None);
        }

        let password = stored_password.and_then(|stored| match decode_password(&stored) {
            Ok(plain) => Some(plain),
            Err(e) => {
                warn!(url, error = %e, "stored password could not be decoded");
                None
            }
        });

        Ok(Some(StoredEntry {
            url: url.to_string(),
            username,
            password,
        }))
    }

    /// Writes both keys of `entry`, username first.
    ///
    /// A failure on the password write leaves the username written.
    pub fn upsert(&mut self, entry: &CredentialEntry) -> Result<(), BackendError> {
        self.set_raw_field(&entry.url, Field::Username, Some(&entry.username))?;
        self.set_raw_field(&entry.url, Field::Password, Some(&encode_password(&entry.password)))?;
        debug!(url = %entry.url, "stored entry");
        Ok(())
    }

    /// Stores `entry`, first removing `old_url` when the url changed.
    pub fn rename(&mut self, old_url: &str, entry: &CredentialEntry) -> Result<(), BackendError> {
        if old_url != entry.url {
            self.delete(old_url)?;
            debug!(from = old_url, to = %entry.url, "renamed entry");
        }
        self.upsert(entry)
    }

    /// Removes both keys of `url`. Deleting an absent url is a no-op.
    pub fn delete(&mut self, url: &str) -> Result<(), BackendError> {
        self.set_raw_field(url, Field::Username, None)?;
        self.set_raw_field(url, Field::Password, None)?;
        debug!(url, "deleted entry");
        Ok(())
    }

    /// Every url with at least one stored key.
    pub fn list_urls(&self) -> Result<BTreeSet<String>, BackendError> {
        Ok(self
            .backend
            .list_keys()?
            .iter()
            .filter_map(|key| split_backend_key(key))
            .map(|(url, _)| url.to_string())
            .collect())
    }

    pub fn exists(&self, url: &str) -> Result<bool, BackendError> {
        Ok(self.get(url)?.is_some())
    }

    /// Reads one key as stored, without decoding.
    pub fn raw_field(&self, url: &str, field: Field) -> Result<Option<String>, BackendError> {
        self.backend.get(&backend_key(url, field))
    }

    /// Writes one key as given, without encoding. `None` deletes it.
    pub fn set_raw_field(&mut self, url: &str, field: Field, value: Option<&str>) -> Result<(), BackendError> {
        self.backend.set(&backend_key(url, field), value)
    }

    /// Asks the backend for a snapshot before a bulk change.
    pub fn backup(&self) -> Result<Option<PathBuf>, BackendError> {
        let backup = self.backend.backup()?;
        if let Some(path) = &backup {
            info!(backup = %path.display(), "backed up settings");
        }
        Ok(backup)
    }
}

impl<B: SettingsBackend> UrlLookup for CredentialStore<B> {
    fn url_exists(&self, url: &str) -> Result<bool, BackendError> {
        self.exists(url)
    }
}

#[cfg(test)]
mod tests;
