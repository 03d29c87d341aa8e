//! Controller - Mediates between the store and whatever renders it
//!
//! # Responsibilities
//!
//! - Run every form through the validation pipeline before writing
//! - Resolve bulk targets (ticked rows, else the highlighted row)
//! - Ask for delete confirmation and back up settings before bulk changes
//! - Refresh the list model after every mutation
//!
//! # Architecture
//!
//! The Controller owns the `CredentialStore` and the `EntryListModel` but
//! knows nothing about widgets. Questions for the user go through the
//! `Confirm` trait, so a dialog, a terminal prompt or a test closure can
//! answer them.

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{BackendError, SettingsBackend};
use crate::core::types::{CredentialEntry, StoredEntry};
use crate::core::validator::{validate_entry, Confirm, EntryForm, Prompt, ValidationError, ValidationMode};
use crate::store::{CredentialStore, StoreError};
use crate::ui::list_model::EntryListModel;
use crate::ui::manual_entry::ManualEntryDraft;

/// Errors surfaced to the user by controller operations
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No row ticked and none highlighted
    #[error("Nothing selected")]
    NothingSelected,

    /// Edit needs a highlighted row
    #[error("No entry highlighted")]
    NoHighlightedRow,

    /// Highlighted url has nothing stored any more
    #[error("No credentials stored for {0}")]
    NotFound(String),

    /// User declined a confirmation
    #[error("Cancelled")]
    Cancelled,
}

impl From<BackendError> for ControllerError {
    fn from(e: BackendError) -> Self {
        ControllerError::Store(StoreError::Backend(e))
    }
}

/// MVC Controller over a credential store
pub struct Controller<B: SettingsBackend> {
    store: CredentialStore<B>,
    list: EntryListModel,
}

impl<B: SettingsBackend> Controller<B> {
    /// Creates a Controller and loads the initial listing
    ///
    /// # Example
    ///
    /// ```
    /// use teamcreds::config::MemoryBackend;
    /// use teamcreds::ui::Controller;
    ///
    /// let controller = Controller::new(MemoryBackend::new())?;
    /// assert!(controller.list().is_empty());
    /// # Ok::<(), teamcreds::ui::ControllerError>(())
    /// ```
    pub fn new(backend: B) -> Result<Self, ControllerError> {
        Self::from_store(CredentialStore::new(backend))
    }

    pub fn from_store(store: CredentialStore<B>) -> Result<Self, ControllerError> {
        let mut controller = Self {
            store,
            list: EntryListModel::new(),
        };
        controller.refresh()?;
        Ok(controller)
    }

    pub fn store(&self) -> &CredentialStore<B> {
        &self.store
    }

    pub fn list(&self) -> &EntryListModel {
        &self.list
    }

    /// Direct access for selection, sorting and highlighting
    pub fn list_mut(&mut self) -> &mut EntryListModel {
        &mut self.list
    }

    pub fn into_store(self) -> CredentialStore<B> {
        self.store
    }

    /// Reloads the listing from the store
    ///
    /// # Returns
    /// Number of urls listed
    pub fn refresh(&mut self) -> Result<usize, ControllerError> {
        Ok(self.list.refresh(&self.store)?)
    }

    /// Adds a new entry
    pub fn add<C>(&mut self, form: &EntryForm, confirm: &mut C) -> Result<CredentialEntry, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        let entry = validate_entry(form, ValidationMode::Add, &self.store, confirm)?;
        self.store.upsert(&entry)?;
        info!(url = %entry.url, "added credentials");
        self.refresh()?;
        Ok(entry)
    }

    /// Adds an entry from the manual entry form
    ///
    /// With `remember` the url is kept for next time; without it any
    /// previously remembered url is dropped.
    pub fn manual_import<C>(
        &mut self,
        form: &EntryForm,
        remember: bool,
        confirm: &mut C,
    ) -> Result<CredentialEntry, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        let entry = validate_entry(form, ValidationMode::Add, &self.store, confirm)?;
        self.store.upsert(&entry)?;

        if remember {
            self.store.remember_draft(&entry.url)?;
        } else {
            self.store.forget_draft()?;
        }

        info!(url = %entry.url, remember, "imported credentials manually");
        self.refresh()?;
        Ok(entry)
    }

    /// Submits a manual entry form
    pub fn submit_manual<C>(&mut self, draft: &ManualEntryDraft, confirm: &mut C) -> Result<CredentialEntry, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        self.manual_import(&draft.to_form(), draft.remember(), confirm)
    }

    /// Remembered manual entry, missing fields blank
    pub fn recall_draft(&self) -> Result<Option<CredentialEntry>, ControllerError> {
        Ok(self.store.recall_draft()?)
    }

    /// Remembered manual entry, for `ManualEntryDraft::set_remember`
    pub fn remembered_draft(&self) -> Result<Option<StoredEntry>, ControllerError> {
        Ok(self.store.draft_entry()?)
    }

    /// Loads the highlighted entry into an edit form
    pub fn load_for_edit(&self, strip_whitespace: bool) -> Result<EntryForm, ControllerError> {
        let url = self.list.highlighted().ok_or(ControllerError::NoHighlightedRow)?;
        let stored = self
            .store
            .get(url)?
            .ok_or_else(|| ControllerError::NotFound(url.to_string()))?;

        let entry = stored.into_entry();
        Ok(EntryForm::new(entry.url, entry.username, entry.password, strip_whitespace))
    }

    /// Saves an edited entry originally stored under `original_url`
    ///
    /// Changing the url moves the entry: the old keys are deleted first.
    pub fn edit<C>(&mut self, original_url: &str, form: &EntryForm, confirm: &mut C) -> Result<CredentialEntry, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        let entry = validate_entry(form, ValidationMode::Edit { original_url }, &self.store, confirm)?;
        self.store.rename(original_url, &entry)?;
        info!(from = original_url, url = %entry.url, "edited credentials");
        self.refresh()?;
        Ok(entry)
    }

    /// Edits the highlighted entry
    pub fn edit_highlighted<C>(&mut self, form: &EntryForm, confirm: &mut C) -> Result<CredentialEntry, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        let original_url = self
            .list
            .highlighted()
            .ok_or(ControllerError::NoHighlightedRow)?
            .to_string();
        self.edit(&original_url, form, confirm)
    }

    fn targets(&self) -> Result<Vec<String>, ControllerError> {
        let targets = self.list.targets();
        if targets.is_empty() {
            return Err(ControllerError::NothingSelected);
        }
        Ok(targets)
    }

    /// Deletes the target entries after confirmation
    ///
    /// # Returns
    /// Number of urls deleted
    pub fn delete_selected<C>(&mut self, confirm: &mut C) -> Result<usize, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        let targets = self.targets()?;
        self.delete_urls(&targets, confirm)
    }

    fn delete_urls<C>(&mut self, urls: &[String], confirm: &mut C) -> Result<usize, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(&Prompt::DeleteEntries { count: urls.len() }) {
            return Err(ControllerError::Cancelled);
        }

        self.store.backup()?;

        let result = urls.iter().try_for_each(|url| self.store.delete(url));
        // Earlier deletes stick even when a later one fails
        self.refresh_after(result.map_err(ControllerError::from))?;

        info!(count = urls.len(), "deleted credentials");
        Ok(urls.len())
    }

    /// Exports the target entries to `path`
    ///
    /// # Returns
    /// Number of urls exported
    pub fn export_selected(&self, path: &Path) -> Result<usize, ControllerError> {
        let targets = self.targets()?;
        Ok(self.store.export_to_file(&targets, path)?)
    }

    /// Exports the target entries, then deletes them after confirmation
    ///
    /// Nothing is deleted if the export fails.
    pub fn export_then_delete<C>(&mut self, path: &Path, confirm: &mut C) -> Result<usize, ControllerError>
    where
        C: Confirm + ?Sized,
    {
        let targets = self.targets()?;
        self.store.export_to_file(&targets, path)?;
        self.delete_urls(&targets, confirm)
    }

    /// Merges a `.properties` file into the store
    ///
    /// # Returns
    /// Number of urls imported
    pub fn import_file(&mut self, path: &Path) -> Result<usize, ControllerError> {
        self.store.backup()?;
        let result = self.store.import_file(path);
        // A partial import still changed the store
        self.refresh_after(result.map_err(ControllerError::from))
    }

    /// Refreshes after a mutation that may have partly applied
    ///
    /// The mutation's own error wins; a refresh failure behind it is only
    /// logged.
    fn refresh_after<T>(&mut self, result: Result<T, ControllerError>) -> Result<T, ControllerError> {
        match (result, self.refresh()) {
            (Ok(value), Ok(_)) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(refresh_err)) => {
                warn!(error = %refresh_err, "listing not refreshed after failed change");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryBackend;

    fn yes(_: &Prompt) -> bool {
        true
    }

    #[test]
    fn test_controller_creation_loads_rows() {
        let backend: MemoryBackend = [("http://a!username", "a"), ("http://b!password", "Yg==")].into_iter().collect();
        let controller = Controller::new(backend).unwrap();

        assert_eq!(controller.list().urls(), vec!["http://a".to_string(), "http://b".to_string()]);
    }

    #[test]
    fn test_add_refreshes_listing() {
        let mut controller = Controller::new(MemoryBackend::new()).unwrap();
        controller
            .add(&EntryForm::new("http://x", "bob", "pw", true), &mut yes)
            .unwrap();

        assert_eq!(controller.list().len(), 1);
    }
}
