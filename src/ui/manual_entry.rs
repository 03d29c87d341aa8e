//! Manual entry form state with "remember input"
//!
//! The form keeps two sets of values. The visible fields are what the user
//! sees. The temporary values follow every user edit. Turning "remember"
//! on shows the remembered entry from the store, falling back to the
//! temporary values for anything it lacks; turning it off brings the
//! temporary values back.

use crate::core::types::{Field, StoredEntry};
use crate::core::validator::EntryForm;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Values {
    url: String,
    username: String,
    password: String,
}

impl Values {
    fn get(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    fn set(&mut self, field: Field, text: String) {
        match field {
            Field::Url => self.url = text,
            Field::Username => self.username = text,
            Field::Password => self.password = text,
        }
    }
}

/// Manual entry form
#[derive(Clone, Debug, Default)]
pub struct ManualEntryDraft {
    fields: Values,
    temp: Values,
    remember: bool,
    strip_whitespace: bool,
}

impl ManualEntryDraft {
    /// Empty form with "remember" off
    pub fn new(strip_whitespace: bool) -> Self {
        Self {
            strip_whitespace,
            ..Self::default()
        }
    }

    /// Form opened with "remember" on, showing `remembered` if given
    pub fn with_remembered(strip_whitespace: bool, remembered: Option<StoredEntry>) -> Self {
        let mut draft = Self::new(strip_whitespace);
        draft.set_remember(true, remembered);
        draft
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn strip_whitespace(&self) -> bool {
        self.strip_whitespace
    }

    pub fn set_strip_whitespace(&mut self, strip: bool) {
        self.strip_whitespace = strip;
    }

    /// User typed into `field`
    pub fn edit(&mut self, field: Field, text: impl Into<String>) {
        self.fields.set(field, text.into());
        self.temp = self.fields.clone();
    }

    /// User toggled "remember input"
    ///
    /// `remembered` is what the store holds for the remembered url, as
    /// returned by `CredentialStore::draft_entry`. It is ignored when
    /// turning "remember" off.
    pub fn set_remember(&mut self, remember: bool, remembered: Option<StoredEntry>) {
        self.remember = remember;

        if !remember {
            self.fields = self.temp.clone();
            return;
        }

        self.fields = match remembered {
            Some(stored) => Values {
                url: stored.url,
                username: stored.username.unwrap_or_else(|| self.temp.username.clone()),
                password: stored.password.unwrap_or_else(|| self.temp.password.clone()),
            },
            None => self.temp.clone(),
        };
    }

    /// Current fields as validation input
    pub fn to_form(&self) -> EntryForm {
        EntryForm::new(
            self.fields.url.clone(),
            self.fields.username.clone(),
            self.fields.password.clone(),
            self.strip_whitespace,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(url: &str, username: Option<&str>, password: Option<&str>) -> StoredEntry {
        StoredEntry {
            url: url.to_string(),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_new_form_is_empty() {
        let draft = ManualEntryDraft::new(true);

        assert!(!draft.remember());
        assert_eq!(draft.field(Field::Url), "");
        assert_eq!(draft.field(Field::Password), "");
    }

    #[test]
    fn test_remember_on_shows_stored_values() {
        let mut draft = ManualEntryDraft::new(true);
        draft.edit(Field::Url, "http://typed");

        draft.set_remember(true, Some(stored("http://kept", Some("bob"), Some("pw"))));

        assert_eq!(draft.field(Field::Url), "http://kept");
        assert_eq!(draft.field(Field::Username), "bob");
        assert_eq!(draft.field(Field::Password), "pw");
    }

    #[test]
    fn test_remember_on_falls_back_per_field() {
        let mut draft = ManualEntryDraft::new(true);
        draft.edit(Field::Username, "typed user");
        draft.edit(Field::Password, "typed pw");

        draft.set_remember(true, Some(stored("http://kept", None, None)));

        assert_eq!(draft.field(Field::Url), "http://kept");
        assert_eq!(draft.field(Field::Username), "typed user");
        assert_eq!(draft.field(Field::Password), "typed pw");
    }

    #[test]
    fn test_remember_off_restores_typed_values() {
        let mut draft = ManualEntryDraft::new(true);
        draft.edit(Field::Url, "http://typed");

        draft.set_remember(true, Some(stored("http://kept", Some("bob"), Some("pw"))));
        draft.set_remember(false, None);

        assert_eq!(draft.field(Field::Url), "http://typed");
        assert_eq!(draft.field(Field::Username), "");
    }

    #[test]
    fn test_edits_while_remembering_are_kept() {
        let mut draft = ManualEntryDraft::with_remembered(false, Some(stored("http://kept", Some("bob"), Some("pw"))));
        draft.edit(Field::Username, "alice");
        draft.set_remember(false, None);

        // Temporary values picked up the whole form at the time of the edit
        assert_eq!(draft.field(Field::Url), "http://kept");
        assert_eq!(draft.field(Field::Username), "alice");
    }

    #[test]
    fn test_to_form_carries_strip_flag() {
        let mut draft = ManualEntryDraft::new(false);
        draft.edit(Field::Url, " http://x ");
        draft.set_strip_whitespace(true);

        let form = draft.to_form();
        assert_eq!(form.url, " http://x ");
        assert!(form.strip_whitespace);
    }
}
