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

//! Settings persisted as a `.properties` file
//!
//! The whole file is held in memory and rewritten atomically after every
//! `set`, so a crash never leaves it half-written. A failed write leaves
//! both the file and the in-memory view unchanged.

use atomic_write_file::AtomicWriteFile;
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{BackendError, SettingsBackend};
use crate::core::properties::{parse_properties, write_properties};

const FILE_HEADER: &str = "teamcreds settings";

/// File-backed settings store with timestamped backups.
#[derive(Debug)]
pub struct PropertiesFileBackend {
    path: PathBuf,
    backup_dir: PathBuf,
    values: BTreeMap<String, String>,
}

impl PropertiesFileBackend {
    /// Opens the settings file at `path`.
    ///
    /// A missing file is an empty store; it is created on the first write.
    /// Backups go to a `backups/` directory next to the file.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Load` if the file exists but cannot be read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let path = path.into();

        // Allowed, but worth knowing about
        if path.read_link().is_ok() {
            warn!(path = %path.display(), "settings file is a symlink");
        }

        let backup_dir = path
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));

        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| BackendError::Load {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            parse_properties(&content)
                .map_err(|e| BackendError::Load {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
                .into_iter()
                .collect()
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = values.len(), "opened settings file");

        Ok(Self {
            path,
            backup_dir,
            values,
        })
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory timestamped backups are written to.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copies the current settings file into the backup directory.
    ///
    /// The backup is named `<file name>.<YYYY-MM-DD_HHMMSS>`. Returns `None`
    /// when the settings file has not been written yet.
    pub fn create_timestamped_backup(&self) -> Result<Option<PathBuf>, BackendError> {
        if !self.path.exists() {
            return Ok(None);
        }

        if !self.backup_dir.exists() {
            fs::create_dir_all(&self.backup_dir)
                .map_err(|_| BackendError::BackupDirNotWritable(self.backup_dir.clone()))?;
        }

        let content = fs::read_to_string(&self.path).map_err(|e| BackendError::BackupFailed(e.to_string()))?;

        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");
        let original_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| BackendError::BackupFailed(format!("unusable file name: {}", self.path.display())))?;

        let backup_path = self.backup_dir.join(format!("{}.{}", original_name, timestamp));
        fs::write(&backup_path, content).map_err(|e| BackendError::BackupFailed(e.to_string()))?;

        debug!(backup = %backup_path.display(), "created settings backup");
        Ok(Some(backup_path))
    }

    /// Lists existing backups of this file, newest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, BackendError> {
        let Some(prefix) = self.path.file_name().and_then(|name| name.to_str()).map(|name| format!("{}.", name)) else {
            return Ok(Vec::new());
        };

        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };

        let mut backups: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffix sorts lexicographically
        backups.sort();
        backups.reverse();
        Ok(backups)
    }

    /// Writes `values` to disk atomically.
    fn persist(&self, key: &str, values: &BTreeMap<String, String>) -> Result<(), BackendError> {
        let write_err = |reason: String| BackendError::Write {
            key: key.to_string(),
            reason,
        };

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }

        let content = write_properties(values.iter().map(|(k, v)| (k.as_str(), v.as_str())), Some(FILE_HEADER));

        let mut file = AtomicWriteFile::options()
            .open(&self.path)
            .map_err(|e| write_err(format!("failed to open for atomic write: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| write_err(format!("failed to write content: {}", e)))?;

        file.commit()
            .map_err(|e| write_err(format!("failed to commit atomic write: {}", e)))?;

        // Settings hold credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| write_err(e.to_string()))?;
        }

        Ok(())
    }
}

impl SettingsBackend for PropertiesFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Option<&str>) -> Result<(), BackendError> {
        if self.values.get(key).map(String::as_str) == value {
            return Ok(());
        }

        let mut next = self.values.clone();
        match value {
            Some(value) => {
                next.insert(key.to_string(), value.to_string());
            }
            None => {
                next.remove(key);
            }
        }

        self.persist(key, &next)?;
        self.values = next;
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.values.keys().cloned().collect())
    }

    fn backup(&self) -> Result<Option<PathBuf>, BackendError> {
        self.create_timestamped_backup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> PropertiesFileBackend {
        PropertiesFileBackend::open(dir.path().join("settings.properties")).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let backend = open_in(&dir);

        assert!(backend.list_keys().unwrap().is_empty());
        assert!(!backend.path().exists(), "Opening should not create the file");
    }

    #[test]
    fn test_backup_dir_next_to_file() {
        let dir = TempDir::new().unwrap();
        let backend = open_in(&dir);

        assert_eq!(backend.backup_dir(), dir.path().join("backups"));
    }

    #[test]
    fn test_no_backup_before_first_write() {
        let dir = TempDir::new().unwrap();
        let backend = open_in(&dir);

        assert_eq!(backend.create_timestamped_backup().unwrap(), None);
    }

    #[test]
    fn test_unchanged_value_skips_write() {
        let dir = TempDir::new().unwrap();
        let mut backend = open_in(&dir);

        backend.set("http://x!username", None).unwrap();
        assert!(!backend.path().exists(), "Deleting an absent key should not write");
    }
}
