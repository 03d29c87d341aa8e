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

//! Toolkit-free presentation layer
//!
//! # Architecture
//!
//! - **Model**: CredentialStore over a SettingsBackend (in `store` and `config`)
//! - **View**: Whatever front-end renders the rows (the CLI in `main.rs`)
//! - **Controller**: Mediates between Model and View (in `controller.rs`)
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs           // This file - exports
//! ├── controller.rs    // MVC Controller
//! ├── list_model.rs    // Selectable, sortable url listing
//! └── manual_entry.rs  // Manual entry form with remembered draft
//! ```

pub mod controller;
pub mod list_model;
pub mod manual_entry;

pub use controller::{Controller, ControllerError};
pub use list_model::{EntryListModel, Row, SortDirection};
pub use manual_entry::ManualEntryDraft;

#[cfg(test)]
mod tests;
