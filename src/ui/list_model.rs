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

//! Selectable, sortable listing of stored urls
//!
//! Rows live in an arena indexed by url. Display order is a separate list
//! of arena indices, so re-sorting only permutes that list and every
//! per-row flag (checkbox selection, highlight) stays attached to its url.
//!
//! Two kinds of "current" row exist side by side:
//! - **Selected**: any number of rows with their checkbox ticked
//! - **Highlighted**: at most one row with focus, used by edit and as the
//!   fallback target of bulk operations when nothing is ticked

use std::collections::HashMap;

use crate::config::{BackendError, SettingsBackend};
use crate::store::CredentialStore;

/// Sort direction of the url column
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One listed url
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    pub url: String,
    pub selected: bool,
}

/// In-memory projection of the store's urls
#[derive(Debug, Default)]
pub struct EntryListModel {
    rows: Vec<Row>,
    index: HashMap<String, usize>,
    /// Arena indices in display order
    order: Vec<usize>,
    direction: SortDirection,
    /// Arena index of the highlighted row
    highlighted: Option<usize>,
}

impl EntryListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all rows with `urls`
    ///
    /// Rows start unselected and sorted ascending; the highlight is
    /// cleared. Duplicate urls collapse into one row.
    pub fn load<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.clear();
        self.index.clear();

        for url in urls {
            let url = url.into();
            if self.index.contains_key(&url) {
                continue;
            }
            self.index.insert(url.clone(), self.rows.len());
            self.rows.push(Row { url, selected: false });
        }

        self.order = (0..self.rows.len()).collect();
        self.direction = SortDirection::Ascending;
        self.highlighted = None;
        self.sort_rows();
    }

    /// Re-reads the url set from `store` and resets all row state
    ///
    /// # Returns
    /// Number of rows now listed
    pub fn refresh<B: SettingsBackend>(&mut self, store: &CredentialStore<B>) -> Result<usize, BackendError> {
        let urls = store.list_urls()?;
        self.load(urls);
        Ok(self.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Rows in display order
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.order.iter().map(|&idx| &self.rows[idx])
    }

    /// Urls in display order
    pub fn urls(&self) -> Vec<String> {
        self.rows().map(|row| row.url.clone()).collect()
    }

    /// Url shown at display `position`
    pub fn url_at(&self, position: usize) -> Option<&str> {
        self.order.get(position).map(|&idx| self.rows[idx].url.as_str())
    }

    /// Flips the sort direction and re-sorts
    ///
    /// Selection and highlight follow their urls.
    pub fn toggle_sort_direction(&mut self) {
        self.direction = self.direction.toggled();
        self.sort_rows();
    }

    fn sort_rows(&mut self) {
        let rows = &self.rows;
        let direction = self.direction;
        self.order.sort_by(|&a, &b| {
            let ordering = rows[a].url.cmp(&rows[b].url);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    /// Selects every row unless all rows are already selected, in which
    /// case every row is deselected
    pub fn toggle_select_all(&mut self) {
        let select = self.rows.iter().any(|row| !row.selected);
        for row in &mut self.rows {
            row.selected = select;
        }
    }

    /// Sets the checkbox of `url`. Returns false if no such row exists.
    pub fn set_selected(&mut self, url: &str, selected: bool) -> bool {
        match self.index.get(url) {
            Some(&idx) => {
                self.rows[idx].selected = selected;
                true
            }
            None => false,
        }
    }

    /// Flips the checkbox of `url`, returning its new state
    pub fn toggle_selected(&mut self, url: &str) -> Option<bool> {
        let idx = *self.index.get(url)?;
        let row = &mut self.rows[idx];
        row.selected = !row.selected;
        Some(row.selected)
    }

    pub fn is_selected(&self, url: &str) -> Option<bool> {
        self.index.get(url).map(|&idx| self.rows[idx].selected)
    }

    /// Selected urls in display order
    pub fn selected_urls(&self) -> Vec<String> {
        self.rows().filter(|row| row.selected).map(|row| row.url.clone()).collect()
    }

    /// Gives focus to `url`. Returns false if no such row exists.
    pub fn highlight(&mut self, url: &str) -> bool {
        match self.index.get(url) {
            Some(&idx) => {
                self.highlighted = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Gives focus to the row at display `position`
    pub fn highlight_at(&mut self, position: usize) -> bool {
        match self.order.get(position) {
            Some(&idx) => {
                self.highlighted = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.map(|idx| self.rows[idx].url.as_str())
    }

    /// Urls a bulk operation should act on
    ///
    /// The selected urls, or else the highlighted one. Empty when there
    /// is neither.
    pub fn targets(&self) -> Vec<String> {
        let selected = self.selected_urls();
        if !selected.is_empty() {
            return selected;
        }
        self.highlighted().map(|url| vec![url.to_string()]).unwrap_or_default()
    }
}
