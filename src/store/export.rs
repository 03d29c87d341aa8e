//! Writing a subset of the store to a `.properties` file

use atomic_write_file::AtomicWriteFile;
use chrono::Local;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::{BackendError, SettingsBackend};
use crate::core::properties::write_properties;
use crate::core::types::{backend_key, Field};
use crate::store::{CredentialStore, StoreError};

const EXPORT_HEADER: &str = "teamcreds export";

/// Removes repeated urls, keeping the first occurrence.
fn dedup_urls<S: AsRef<str>>(urls: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    urls.iter()
        .map(|url| url.as_ref())
        .filter(|url| seen.insert(*url))
        .collect()
}

impl<B: SettingsBackend> CredentialStore<B> {
    /// Collects the stored key/value pairs of `urls`.
    ///
    /// Absent sub-keys are skipped one by one. Passwords stay encoded.
    pub fn collect_export<S: AsRef<str>>(&self, urls: &[S]) -> Result<Vec<(String, String)>, BackendError> {
        let mut pairs = Vec::new();

        for url in dedup_urls(urls) {
            for field in [Field::Username, Field::Password] {
                if let Some(value) = self.raw_field(url, field)? {
                    pairs.push((backend_key(url, field), value));
                }
            }
        }

        Ok(pairs)
    }

    /// Exports `urls` to `path`, replacing the file atomically.
    ///
    /// # Returns
    /// Number of distinct urls requested, including ones with nothing
    /// stored.
    pub fn export_to_file<S: AsRef<str>>(&self, urls: &[S], path: &Path) -> Result<usize, StoreError> {
        let count = dedup_urls(urls).len();
        let mut pairs = self.collect_export(urls)?;
        pairs.sort();

        let comment = format!("{}\n{}", EXPORT_HEADER, Local::now().format("%Y-%m-%d %H:%M:%S"));
        let content = write_properties(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())), Some(&comment));

        let file_err = |source: std::io::Error| StoreError::File {
            path: path.to_path_buf(),
            source,
        };

        let mut file = AtomicWriteFile::options().open(path).map_err(file_err)?;
        file.write_all(content.as_bytes()).map_err(file_err)?;
        file.commit().map_err(file_err)?;

        info!(urls = count, keys = pairs.len(), path = %path.display(), "exported credentials");
        Ok(count)
    }
}
