//! Merging import files into the store
//!
//! An import is a per-url, per-field overwrite. A file that carries only a
//! password for some url replaces that password and leaves the stored
//! username alone. Values are written exactly as they appear in the file,
//! so passwords are expected in their stored (encoded) form, which is what
//! export produces.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::SettingsBackend;
use crate::core::properties::parse_properties;
use crate::core::types::{split_backend_key, Field, KEY_DELIMITER};
use crate::store::{CredentialStore, StoreError};

/// The sub-keys a file supplies for one url.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImportGroup {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Groups credential keys by url.
///
/// Keys not ending in `!username` or `!password` are dropped, and so are
/// keys whose url part is empty. A later pair for the same key wins.
pub fn group_pairs<I, K, V>(pairs: I) -> BTreeMap<String, ImportGroup>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut groups: BTreeMap<String, ImportGroup> = BTreeMap::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        let Some((url, field)) = split_backend_key(key) else {
            if key.strip_prefix(KEY_DELIMITER).and_then(Field::from_suffix).is_some() {
                warn!(key, "skipping credential key without a url");
            } else {
                debug!(key, "ignoring unrelated key");
            }
            continue;
        };

        let group = groups.entry(url.to_string()).or_default();
        match field {
            Field::Username => group.username = Some(value.into()),
            Field::Password => group.password = Some(value.into()),
            Field::Url => {}
        }
    }

    groups
}

impl<B: SettingsBackend> CredentialStore<B> {
    /// Merges key/value pairs into the store.
    ///
    /// # Returns
    /// Number of distinct urls written.
    ///
    /// # Errors
    /// `StoreError::ImportAborted` when a backend write fails. The urls
    /// written before the failure stay written; the rest are skipped.
    pub fn import_pairs<I, K, V>(&mut self, pairs: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let groups = group_pairs(pairs);
        let mut processed = 0;

        for (url, group) in &groups {
            let fields = [(Field::Username, &group.username), (Field::Password, &group.password)];
            for (field, value) in fields {
                if let Some(value) = value {
                    self.set_raw_field(url, field, Some(value.as_str()))
                        .map_err(|source| StoreError::ImportAborted { processed, source })?;
                }
            }
            processed += 1;
        }

        info!(urls = processed, "imported credentials");
        Ok(processed)
    }

    /// Reads a `.properties` file and merges it with [`import_pairs`].
    ///
    /// The file is read and parsed completely before anything is written.
    ///
    /// [`import_pairs`]: CredentialStore::import_pairs
    pub fn import_file(&mut self, path: &Path) -> Result<usize, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let pairs = parse_properties(&content).map_err(|source| StoreError::Properties {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), pairs = pairs.len(), "read import file");
        self.import_pairs(pairs)
    }
}
