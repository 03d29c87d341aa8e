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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! for credential management, including:
//! - Type definitions for entries and the backend key scheme
//! - Reversible password encoding
//! - `.properties` parsing and serialisation
//! - The shared input validation pipeline
//!
//! Nothing here performs I/O, so all of it is unit tested without a
//! settings store or file system.

pub mod codec;
pub mod properties;
pub mod types;
pub mod validator;

pub use codec::{decode_password, encode_password, DecodeError};
pub use types::*;
pub use validator::{validate_entry, Confirm, EntryForm, Prompt, ValidationError, ValidationMode};

#[cfg(test)]
mod tests;
