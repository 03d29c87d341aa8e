use std::path::PathBuf;
use thiserror::Error;

use crate::config::BackendError;
use crate::core::properties::PropertiesError;

/// Errors from store-level operations that touch files or batches.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Settings backend read or write failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Import or export file could not be read or written.
    #[error("Cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Import file is not valid `.properties` text.
    #[error("Cannot parse {path}: {source}")]
    Properties {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },

    /// A write failed partway through an import.
    ///
    /// The `processed` urls before the failure stay written.
    #[error("Import stopped after {processed} url(s): {source}")]
    ImportAborted {
        processed: usize,
        #[source]
        source: BackendError,
    },
}
