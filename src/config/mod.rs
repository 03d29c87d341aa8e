//! Host settings store abstraction.
//!
//! Credentials live inside a host application's key-value settings. This
//! module defines the contract the rest of the crate relies on and two
//! implementations:
//!
//! - **`MemoryBackend`**: Plain in-memory map (tests, embedding)
//! - **`PropertiesFileBackend`**: Settings persisted as a `.properties`
//!   file, rewritten atomically on every change, with timestamped backups
//!
//! # Guarantees
//!
//! A backend only promises last-write-wins per key. Nothing here is atomic
//! across keys, so an entry's username and password are two independent
//! writes.
//!
//! # Example
//!
//! ```
//! use teamcreds::config::{MemoryBackend, SettingsBackend};
//!
//! let mut backend = MemoryBackend::new();
//! backend.set("http://x!username", Some("bob"))?;
//! assert_eq!(backend.get("http://x!username")?, Some("bob".to_string()));
//!
//! // None deletes
//! backend.set("http://x!username", None)?;
//! assert!(backend.list_keys()?.is_empty());
//! # Ok::<(), teamcreds::config::BackendError>(())
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod error;
pub mod file_backend;

pub use error::BackendError;
pub use file_backend::PropertiesFileBackend;

/// String key to string value store owned by the host application.
///
/// `set` with `None` removes the key. `list_keys` makes no ordering
/// promise.
pub trait SettingsBackend {
    /// Returns the value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Stores `value` under `key`, or deletes the key when `value` is `None`.
    fn set(&mut self, key: &str, value: Option<&str>) -> Result<(), BackendError>;

    /// Returns every key currently present.
    fn list_keys(&self) -> Result<Vec<String>, BackendError>;

    /// Snapshots the current settings before a bulk change.
    ///
    /// Returns the backup location, or `None` when the backend keeps no
    /// backups.
    fn backup(&self) -> Result<Option<PathBuf>, BackendError> {
        Ok(None)
    }
}

/// In-memory settings backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    values: BTreeMap<String, String>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryBackend
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Option<&str>) -> Result<(), BackendError> {
        match value {
            Some(value) => {
                self.values.insert(key.to_string(), value.to_string());
            }
            None => {
                self.values.remove(key);
            }
        }
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests;
