//! src/core/types.rs
//!
//! Core type definitions for credential management
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Field`: The two per-url sub-keys (`username`, `password`)
//! - `CredentialEntry`: A complete url/username/password triple
//! - `StoredEntry`: What the settings store actually holds for a url
//!
//! It also owns the backend key scheme. Every entry is persisted as two
//! keys, `"{url}!username"` and `"{url}!password"`. Urls may contain `!`
//! themselves, so a key is always split on the LAST `!`.

use std::fmt;

/// Separator between the url and the sub-key in a backend key
pub const KEY_DELIMITER: char = '!';

/// One of the sub-keys stored for every url
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Field {
    /// Url of the endpoint (validation only, never a backend suffix)
    Url,
    /// Login name, stored as plain text
    Username,
    /// Password, stored encoded
    Password,
}

impl Field {
    /// Backend key suffix for this field, if it has one
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Field::Url => None,
            Field::Username => Some("username"),
            Field::Password => Some("password"),
        }
    }

    /// Maps a backend key suffix back to its field
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "username" => Some(Field::Username),
            "password" => Some(Field::Password),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Url => write!(f, "url"),
            Field::Username => write!(f, "username"),
            Field::Password => write!(f, "password"),
        }
    }
}

/// Builds the backend key for a url and one of its stored fields
///
/// # Example
/// ```
/// use teamcreds::core::types::{backend_key, Field};
///
/// assert_eq!(backend_key("http://a!b.com", Field::Username), "http://a!b.com!username");
/// ```
pub fn backend_key(url: &str, field: Field) -> String {
    match field.suffix() {
        Some(suffix) => format!("{}{}{}", url, KEY_DELIMITER, suffix),
        None => url.to_string(),
    }
}

/// Splits a backend key into its url and field
///
/// Only keys ending in `!username` or `!password` with a non-empty url
/// portion are recognised; everything else in the settings store (for
/// example `manualCreds.lastUrl`) yields `None`.
pub fn split_backend_key(key: &str) -> Option<(&str, Field)> {
    let idx = key.rfind(KEY_DELIMITER)?;
    let field = Field::from_suffix(&key[idx + 1..])?;

    if idx == 0 {
        return None;
    }

    Some((&key[..idx], field))
}

/// A complete credential entry
///
/// Identity is the `url`, compared as an exact, case-sensitive string.
/// The password is held in plain text here and only encoded on its way
/// into the settings store.
#[derive(Clone, Eq, PartialEq)]
pub struct CredentialEntry {
    /// Endpoint url (never empty once validated)
    pub url: String,

    /// Login name
    pub username: String,

    /// Plain text password
    pub password: String,
}

impl CredentialEntry {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of debug output
impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}

impl fmt::Display for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.username)
    }
}

/// The stored state of one url
///
/// Either field may be missing: the two keys are written independently,
/// and imports may supply only one of them. A password that is present
/// but cannot be decoded is reported as `None` as well.
#[derive(Clone, Eq, PartialEq)]
pub struct StoredEntry {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl StoredEntry {
    /// True when both username and password are available
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Converts into a full entry, leaving missing fields blank
    pub fn into_entry(self) -> CredentialEntry {
        CredentialEntry {
            url: self.url,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

impl fmt::Debug for StoredEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredEntry")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<hidden>"))
            .finish()
    }
}
