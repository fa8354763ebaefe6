//! Tests for history/recent_store

use super::*;
use crate::history::FuzzyCloseMatch;
use proptest::prelude::*;

fn queries(store: &RecentSearchStore) -> Vec<&str> {
    store.list().iter().map(|e| e.query.as_str()).collect()
}

#[test]
fn test_record_prepends_newest_first() {
    let mut store = RecentSearchStore::default();
    store.record("atm");
    store.record("bank");
    assert_eq!(queries(&store), vec!["bank", "atm"]);
}

#[test]
fn test_record_trims_and_ignores_empty() {
    let mut store = RecentSearchStore::default();
    assert!(store.record("  pizza  "));
    assert!(!store.record("   "));
    assert!(!store.record(""));
    assert_eq!(queries(&store), vec!["pizza"]);
}

#[test]
fn test_record_ignores_repeat_of_head() {
    let mut store = RecentSearchStore::default();
    assert!(store.record("pizza"));
    assert!(!store.record("pizza"));
    assert!(!store.record(" pizza "));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_record_allows_non_adjacent_repeat() {
    let mut store = RecentSearchStore::default();
    store.record("pizza");
    store.record("tacos");
    store.record("pizza");
    assert_eq!(queries(&store), vec!["pizza", "tacos", "pizza"]);
}

#[test]
fn test_oldest_evicted_on_overflow() {
    let mut store = RecentSearchStore::new(3);
    for q in ["a", "b", "c", "d"] {
        store.record(q);
    }
    assert_eq!(queries(&store), vec!["d", "c", "b"]);
}

#[test]
fn test_zero_capacity_stores_nothing() {
    let mut store = RecentSearchStore::new(0);
    assert!(!store.record("a"));
    assert!(store.is_empty());
}

#[test]
fn test_clear_empties_store() {
    let mut store = RecentSearchStore::default();
    store.record("a");
    store.record("b");
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_set_capacity_truncates() {
    let mut store = RecentSearchStore::new(5);
    for q in ["a", "b", "c", "d"] {
        store.record(q);
    }
    store.set_capacity(2);
    assert_eq!(queries(&store), vec!["d", "c"]);
    assert_eq!(store.capacity(), 2);
}

#[test]
fn test_from_entries_drops_blank_and_truncates() {
    let entries = vec![
        RecentSearchEntry::new("a"),
        RecentSearchEntry::new(" "),
        RecentSearchEntry::new("b"),
        RecentSearchEntry::new("c"),
    ];
    let store = RecentSearchStore::from_entries(entries, 2);
    assert_eq!(queries(&store), vec!["a", "b"]);
}

#[test]
fn test_filter_uses_close_match() {
    let mut store = RecentSearchStore::default();
    store.record("pizza");
    store.record("pharmacy");
    store.record("tacos");

    let matcher = FuzzyCloseMatch::new();
    let filtered = store.filter("p", &SearchContext::Universal, &matcher);
    let filtered: Vec<&str> = filtered.iter().map(|e| e.query.as_str()).collect();
    assert_eq!(filtered, vec!["pharmacy", "pizza"]);
}

#[test]
fn test_filter_empty_in_vertical_context() {
    let mut store = RecentSearchStore::default();
    store.record("pizza");

    let matcher = FuzzyCloseMatch::new();
    let context = SearchContext::Vertical("locations".to_string());
    assert!(store.filter("", &context, &matcher).is_empty());
    assert!(store.filter("pizza", &context, &matcher).is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_head_never_duplicated_and_capacity_respected(
        capacity in 0usize..8,
        inputs in prop::collection::vec(prop::sample::select(vec!["a", "b", " a", "c ", "", "  "]), 0..40)
    ) {
        let mut store = RecentSearchStore::new(capacity);
        for input in inputs {
            store.record(input);
            prop_assert!(store.len() <= capacity);
            let list = store.list();
            for pair in list.windows(2) {
                prop_assert_ne!(&pair[0].query, &pair[1].query);
            }
        }
    }

    #[test]
    fn prop_vertical_filter_always_empty(
        stored in prop::collection::vec("[a-z ]{0,12}", 0..10),
        live in "[a-z ]{0,6}",
        vertical in "[a-z]{1,8}",
    ) {
        let mut store = RecentSearchStore::default();
        for q in &stored {
            store.record(q);
        }
        let matcher = FuzzyCloseMatch::new();
        let context = SearchContext::Vertical(vertical);
        prop_assert!(store.filter(&live, &context, &matcher).is_empty());
    }
}
