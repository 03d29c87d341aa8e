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

//! Input acceptance rules for credential entries
//!
//! Every path that creates or edits an entry (add, manual import, edit)
//! runs the same pipeline, in this order:
//! 1. Optional trimming of all three fields
//! 2. Emptiness (literally empty, or empty only because of trimming)
//! 3. Url well-formedness
//! 4. Whitespace-only username/password (confirmation when not trimming)
//! 5. Url collision with an existing entry (confirmation)
//!
//! The pipeline never touches the store beyond an existence lookup. Its
//! output is a normalised `CredentialEntry` ready to be written.

use std::fmt;
use thiserror::Error;
use url::Url;

use crate::config::BackendError;
use crate::core::types::{CredentialEntry, Field};

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A field was submitted as the empty string
    #[error("All fields are required: {0} is empty")]
    EmptyField(Field),

    /// A field contained only whitespace and trimming emptied it
    #[error("The {0} contains only whitespace and is empty after stripping")]
    EmptyAfterStrip(Field),

    /// Url does not parse
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The user answered "go back" to a confirmation
    #[error("Cancelled: {0}")]
    Declined(Prompt),

    /// Existence lookup against the settings store failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A yes/no question the caller must put to the user
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Prompt {
    /// Username and/or password consist only of whitespace
    WhitespaceOnly { fields: Vec<Field> },
    /// Another entry already uses this url
    DuplicateUrl { url: String },
    /// About to delete this many entries
    DeleteEntries { count: usize },
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::WhitespaceOnly { fields } => {
                let names = fields.iter().map(|field| field.to_string()).collect::<Vec<_>>().join(" and ");
                write!(f, "The {} contains only whitespace. Continue anyway?", names)
            }
            Prompt::DuplicateUrl { url } => {
                write!(f, "Credentials for {} already exist. Overwrite them?", url)
            }
            Prompt::DeleteEntries { count } => {
                write!(f, "Delete {} credential entr{}?", count, if *count == 1 { "y" } else { "ies" })
            }
        }
    }
}

/// Answers confirmation prompts
///
/// Returning `true` means "continue"; `false` aborts the operation with
/// no store mutation. Closures work directly:
///
/// ```
/// use teamcreds::core::validator::{Confirm, Prompt};
///
/// let mut always_yes = |_: &Prompt| true;
/// assert!(always_yes.confirm(&Prompt::DeleteEntries { count: 1 }));
/// ```
pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&Prompt) -> bool,
{
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        self(prompt)
    }
}

/// Existence lookup used for the collision check
pub trait UrlLookup {
    fn url_exists(&self, url: &str) -> Result<bool, BackendError>;
}

/// Raw form input as typed by the user
#[derive(Clone, Debug, Default)]
pub struct EntryForm {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Trim leading/trailing whitespace from all fields before checking
    pub strip_whitespace: bool,
}

impl EntryForm {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        strip_whitespace: bool,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            strip_whitespace,
        }
    }
}

/// Which flow the entry comes from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationMode<'a> {
    /// New entry (add dialog or manual import)
    Add,
    /// Existing entry, originally stored under `original_url`
    Edit { original_url: &'a str },
}

/// Validates url syntax
///
/// The url must be hierarchical and name a host.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(invalid("not a hierarchical url".to_string()));
    }
    if parsed.host_str().unwrap_or_default().is_empty() {
        return Err(invalid("url has no host".to_string()));
    }
    Ok(())
}

/// True for non-empty text made only of whitespace
fn is_blank(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}

/// Runs steps 1-4: normalisation and the checks that need no store
///
/// Whitespace-only usernames/passwords trigger a confirmation only when
/// `strip_whitespace` is off; with stripping on they are already rejected
/// as `EmptyAfterStrip`.
pub fn check_form<C>(form: &EntryForm, confirm: &mut C) -> Result<CredentialEntry, ValidationError>
where
    C: Confirm + ?Sized,
{
    let raw = [
        (Field::Url, form.url.as_str()),
        (Field::Username, form.username.as_str()),
        (Field::Password, form.password.as_str()),
    ];

    // Literally empty input is reported before anything stripping caused
    if let Some((field, _)) = raw.iter().find(|(_, text)| text.is_empty()) {
        return Err(ValidationError::EmptyField(*field));
    }

    let normalise = |text: &str| {
        if form.strip_whitespace {
            text.trim().to_string()
        } else {
            text.to_string()
        }
    };

    let entry = CredentialEntry::new(normalise(&form.url), normalise(&form.username), normalise(&form.password));

    if form.strip_whitespace {
        let stripped = [
            (Field::Url, entry.url.as_str()),
            (Field::Username, entry.username.as_str()),
            (Field::Password, entry.password.as_str()),
        ];
        if let Some((field, _)) = stripped.iter().find(|(_, text)| text.is_empty()) {
            return Err(ValidationError::EmptyAfterStrip(*field));
        }
    }

    validate_url(&entry.url)?;

    if !form.strip_whitespace {
        let fields: Vec<Field> = [(Field::Username, &entry.username), (Field::Password, &entry.password)]
            .into_iter()
            .filter(|(_, text)| is_blank(text))
            .map(|(field, _)| field)
            .collect();

        if !fields.is_empty() {
            let prompt = Prompt::WhitespaceOnly { fields };
            if !confirm.confirm(&prompt) {
                return Err(ValidationError::Declined(prompt));
            }
        }
    }

    Ok(entry)
}

/// Runs the full pipeline, including the url collision check
///
/// # Arguments
/// * `form` - Raw user input
/// * `mode` - Add, or Edit with the url the entry was loaded from
/// * `lookup` - Existence check against the store
/// * `confirm` - Answers the whitespace and overwrite questions
///
/// # Returns
/// The normalised entry, or a typed rejection. Nothing is written.
pub fn validate_entry<L, C>(
    form: &EntryForm,
    mode: ValidationMode<'_>,
    lookup: &L,
    confirm: &mut C,
) -> Result<CredentialEntry, ValidationError>
where
    L: UrlLookup + ?Sized,
    C: Confirm + ?Sized,
{
    let entry = check_form(form, confirm)?;

    let collision_possible = match mode {
        ValidationMode::Add => true,
        ValidationMode::Edit { original_url } => original_url != entry.url,
    };

    if collision_possible && lookup.url_exists(&entry.url)? {
        let prompt = Prompt::DuplicateUrl { url: entry.url.clone() };
        if !confirm.confirm(&prompt) {
            return Err(ValidationError::Declined(prompt));
        }
    }

    Ok(entry)
}
