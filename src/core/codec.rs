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

//! Reversible password encoding
//!
//! Passwords are stored as standard base64 of their UTF-8 bytes. This is a
//! storage format, NOT protection: anyone who can read the settings store
//! can decode every password.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// A stored password value that could not be turned back into text
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Value is not valid base64
    #[error("Stored password is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8 text
    #[error("Stored password is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encodes a plain text password into its stored form
///
/// Deterministic and total: every string has exactly one encoding.
pub fn encode_password(plain: &str) -> String {
    STANDARD.encode(plain.as_bytes())
}

/// Decodes a stored password back into plain text
///
/// # Errors
///
/// Returns `DecodeError` for malformed input. Callers reading from the
/// store treat this as "no stored password".
pub fn decode_password(stored: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(stored.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}
