use crate::config::MemoryBackend;
use crate::core::types::CredentialEntry;
use crate::store::CredentialStore;
use crate::ui::list_model::{EntryListModel, SortDirection};

fn model_with(urls: &[&str]) -> EntryListModel {
    let mut model = EntryListModel::new();
    model.load(urls.iter().copied());
    model
}

#[test]
fn test_load_sorts_ascending() {
    let model = model_with(&["http://c", "http://a", "http://b"]);

    assert_eq!(model.urls(), vec!["http://a", "http://b", "http://c"]);
    assert_eq!(model.direction(), SortDirection::Ascending);
}

#[test]
fn test_load_collapses_duplicates() {
    let model = model_with(&["http://a", "http://a"]);
    assert_eq!(model.len(), 1);
}

#[test]
fn test_toggle_select_all_mixed_selects_all() {
    let mut model = model_with(&["A", "B"]);
    model.set_selected("A", true);

    model.toggle_select_all();
    assert_eq!(model.selected_urls(), vec!["A", "B"]);

    model.toggle_select_all();
    assert!(model.selected_urls().is_empty());
}

#[test]
fn test_toggle_select_all_on_empty_model() {
    let mut model = EntryListModel::new();
    model.toggle_select_all();
    assert!(model.selected_urls().is_empty());
}

#[test]
fn test_sort_toggle_keeps_selection_with_url() {
    let mut model = model_with(&["B", "A"]);
    model.toggle_sort_direction();
    // Descending: [B, A]
    model.set_selected("B", true);
    let before: Vec<_> = model.rows().cloned().collect();
    assert_eq!(before[0].url, "B");
    assert!(before[0].selected);

    model.toggle_sort_direction();

    let after: Vec<(String, bool)> = model.rows().map(|row| (row.url.clone(), row.selected)).collect();
    assert_eq!(after, vec![("A".to_string(), false), ("B".to_string(), true)]);
}

#[test]
fn test_highlight_follows_url_across_sort() {
    let mut model = model_with(&["A", "B", "C"]);
    assert!(model.highlight_at(0));
    assert_eq!(model.highlighted(), Some("A"));

    model.toggle_sort_direction();

    assert_eq!(model.url_at(0), Some("C"));
    assert_eq!(model.highlighted(), Some("A"));
}

#[test]
fn test_selected_urls_in_display_order() {
    let mut model = model_with(&["A", "B", "C"]);
    model.set_selected("A", true);
    model.set_selected("C", true);
    model.toggle_sort_direction();

    assert_eq!(model.selected_urls(), vec!["C", "A"]);
}

#[test]
fn test_toggle_selected_row() {
    let mut model = model_with(&["A"]);

    assert_eq!(model.toggle_selected("A"), Some(true));
    assert_eq!(model.toggle_selected("A"), Some(false));
    assert_eq!(model.toggle_selected("missing"), None);
    assert!(!model.set_selected("missing", true));
}

#[test]
fn test_targets_prefer_selection() {
    let mut model = model_with(&["A", "B"]);
    model.highlight("A");
    model.set_selected("B", true);

    assert_eq!(model.targets(), vec!["B"]);
}

#[test]
fn test_targets_fall_back_to_highlight() {
    let mut model = model_with(&["A", "B"]);
    model.highlight("B");

    assert_eq!(model.targets(), vec!["B"]);

    model.clear_highlight();
    assert!(model.targets().is_empty());
}

#[test]
fn test_refresh_resets_state() {
    let mut store = CredentialStore::new(MemoryBackend::new());
    store.upsert(&CredentialEntry::new("http://b", "b", "b")).unwrap();
    store.upsert(&CredentialEntry::new("http://a", "a", "a")).unwrap();

    let mut model = EntryListModel::new();
    assert_eq!(model.refresh(&store).unwrap(), 2);

    model.toggle_select_all();
    model.toggle_sort_direction();
    model.highlight("http://a");

    store.upsert(&CredentialEntry::new("http://c", "c", "c")).unwrap();
    model.refresh(&store).unwrap();

    assert_eq!(model.urls(), vec!["http://a", "http://b", "http://c"]);
    assert!(model.selected_urls().is_empty());
    assert_eq!(model.direction(), SortDirection::Ascending);
    assert_eq!(model.highlighted(), None);
}
