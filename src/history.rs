//! Recent searches
//!
//! A bounded, newest-first list of submitted queries with a close-match
//! filter against the live query and optional TOML persistence.

mod matcher;
mod recent_store;
pub mod storage;

pub use matcher::{CloseMatch, FuzzyCloseMatch};
pub use recent_store::{DEFAULT_RECENT_SEARCHES_LIMIT, RecentSearchEntry, RecentSearchStore};
