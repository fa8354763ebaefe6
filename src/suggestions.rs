//! Suggestion panel contents
//!
//! Merges recent searches, autocomplete results, vertical links, and entity
//! previews into one ordered list and derives the screen-reader summary.

mod aggregator;
mod announce;
mod types;

pub use aggregator::{
    AccessibleCounts, Aggregation, AggregationInput, aggregate, vertical_link_path,
};
pub use announce::{EnglishPhrases, PhraseFormatter, announcement};
pub use types::{
    AggregatedSuggestion, EntityPreview, SearchIntent, SelectionMetadata, Suggestion,
    SuggestionResponse, SuggestionRow,
};
