// Copyright 2025 bakri (tidynest@proton.me)
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

//! Team credential manager
//!
//! Keeps per-endpoint credentials (url, username, password) inside a host
//! application's key-value settings store, and moves them in and out of
//! `.properties` files so a team can share them.
//!
//! # Features
//!
//! - **CRUD Operations:** Add, read, edit (including url renames) and delete entries
//! - **Import/Export:** Per-field merge from files, subset export to files
//! - **Validation:** One pipeline for every form, with confirmation prompts
//! - **List Model:** Selection and highlight that survive re-sorting
//! - **Automatic Backups:** Timestamped backups before bulk changes
//! - **Atomic Operations:** Settings and export files are never half-written
//!
//! # Architecture
//!
//! - **`core`:** Types, key scheme, password codec, `.properties` format, validation
//! - **`config`:** Settings backends (in-memory, `.properties` file)
//! - **`store`:** Credential entries over a backend, import, export, drafts
//! - **`ui`:** Toolkit-free list model and controller (MVC pattern)
//!
//! # Security
//!
//! Passwords are stored base64 encoded. That is a reversible transform for
//! storage convenience, nothing more: anyone who can read the settings can
//! read the passwords.
//!
//! # Examples
//!
//! ## Adding and listing entries
//!
//! ```
//! use teamcreds::config::MemoryBackend;
//! use teamcreds::core::{EntryForm, Prompt};
//! use teamcreds::ui::Controller;
//!
//! let mut controller = Controller::new(MemoryBackend::new())?;
//! let form = EntryForm::new("https://svn.example.com/repo", "bob", "s3cret", true);
//! controller.add(&form, &mut |_: &Prompt| true)?;
//!
//! assert_eq!(controller.list().urls(), vec!["https://svn.example.com/repo"]);
//! # Ok::<(), teamcreds::ui::ControllerError>(())
//! ```
//!
//! ## Importing a shared file
//!
//! ```no_run
//! use teamcreds::config::PropertiesFileBackend;
//! use teamcreds::store::CredentialStore;
//! use std::path::Path;
//!
//! let backend = PropertiesFileBackend::open("/tmp/settings.properties")?;
//! let mut store = CredentialStore::new(backend);
//! let count = store.import_file(Path::new("/tmp/team.properties"))?;
//! println!("Imported {} urls", count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod store;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::core::{CredentialEntry, EntryForm, Field, StoredEntry};
pub use crate::store::CredentialStore;
