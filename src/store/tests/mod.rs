//! Store module tests
//!
//! Contains test suites for credential persistence:
//! - Entry CRUD and key scheme behaviour
//! - Import merging, including partial batches
//! - Export selection and file output
//! - Remembered draft handling

use crate::config::{BackendError, MemoryBackend, SettingsBackend};

#[cfg(test)]
mod export_tests;

/// Backend that accepts a fixed number of writes, then fails every one.
pub(super) struct FlakyBackend {
    pub inner: MemoryBackend,
    pub writes_left: usize,
    pub fail_reads: bool,
}

impl FlakyBackend {
    pub fn failing_after(writes: usize) -> Self {
        Self {
            inner: MemoryBackend::new(),
            writes_left: writes,
            fail_reads: false,
        }
    }
}

impl SettingsBackend for FlakyBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        if self.fail_reads {
            return Err(BackendError::Read {
                key: key.to_string(),
                reason: "disk on fire".to_string(),
            });
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Option<&str>) -> Result<(), BackendError> {
        if self.writes_left == 0 {
            return Err(BackendError::Write {
                key: key.to_string(),
                reason: "disk full".to_string(),
            });
        }
        self.writes_left -= 1;
        self.inner.set(key, value)
    }

    fn list_keys(&self) -> Result<Vec<String>, BackendError> {
        self.inner.list_keys()
    }
}
