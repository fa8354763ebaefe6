//! Tests for history/matcher

use super::*;

#[test]
fn test_empty_query_matches_everything() {
    let matcher = FuzzyCloseMatch::new();
    assert!(matcher.is_close_match("pizza", ""));
    assert!(matcher.is_close_match("pizza", "   "));
}

#[test]
fn test_fuzzy_matching() {
    let matcher = FuzzyCloseMatch::new();
    assert!(matcher.is_close_match("coffee shops", "cfe"));
}

#[test]
fn test_case_insensitive() {
    let matcher = FuzzyCloseMatch::new();
    assert!(matcher.is_close_match("Pizza Near Me", "pizza"));
    assert!(matcher.is_close_match("PIZZA", "pizza"));
}

#[test]
fn test_no_match() {
    let matcher = FuzzyCloseMatch::new();
    assert!(!matcher.is_close_match("pizza", "xyz"));
}

#[test]
fn test_multi_word_query_ands_terms() {
    let matcher = FuzzyCloseMatch::new();
    assert!(matcher.is_close_match("open late pharmacy", "pharmacy late"));
    assert!(!matcher.is_close_match("pharmacy", "pharmacy late"));
}

#[test]
fn test_exact_match_scores_higher_than_scattered() {
    let matcher = FuzzyCloseMatch::new();
    let exact = matcher.score("bank", "bank").unwrap();
    let scattered = matcher.score("b_a_n_k", "bank").unwrap();
    assert!(exact > scattered);
}

#[test]
fn test_closure_acts_as_close_match() {
    let prefix = |candidate: &str, query: &str| candidate.starts_with(query);
    assert!(prefix.is_close_match("atm", "at"));
    assert!(!prefix.is_close_match("atm", "tm"));
}
