use serde::{Deserialize, Serialize};

use crate::history::RecentSearchEntry;

/// One autocomplete result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Suggestion {
    pub value: String,
    /// Verticals this suggestion has results in
    #[serde(default)]
    pub vertical_keys: Vec<String>,
}

impl Suggestion {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            vertical_keys: Vec::new(),
        }
    }

    pub fn with_verticals<I, S>(value: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            vertical_keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Intent the backend detected in the live input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchIntent {
    NearMe,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub results: Vec<Suggestion>,
    #[serde(default)]
    pub input_intents: Vec<SearchIntent>,
}

impl SuggestionResponse {
    pub fn new(results: Vec<Suggestion>) -> Self {
        Self {
            results,
            input_intents: Vec::new(),
        }
    }

    pub fn has_intent(&self, intent: SearchIntent) -> bool {
        self.input_intents.contains(&intent)
    }
}

/// Rich preview of a result entity, rendered by the host
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityPreview {
    pub title: String,
    #[serde(default)]
    pub vertical_key: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One row of the suggestion panel
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedSuggestion {
    RecentSearch(RecentSearchEntry),
    QuerySuggestion(Suggestion),
    VerticalLink {
        suggestion: Suggestion,
        vertical_key: String,
        label: String,
        path: String,
    },
    EntityPreview(EntityPreview),
}

/// What selecting a row should do besides filling the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionMetadata {
    #[default]
    None,
    VerticalLink {
        path: String,
    },
}

impl AggregatedSuggestion {
    /// Text placed in the input when the row is highlighted or selected
    pub fn value(&self) -> &str {
        match self {
            AggregatedSuggestion::RecentSearch(entry) => &entry.query,
            AggregatedSuggestion::QuerySuggestion(suggestion) => &suggestion.value,
            AggregatedSuggestion::VerticalLink { suggestion, .. } => &suggestion.value,
            AggregatedSuggestion::EntityPreview(preview) => &preview.title,
        }
    }

    pub fn selection_metadata(&self) -> SelectionMetadata {
        match self {
            AggregatedSuggestion::VerticalLink { path, .. } => {
                SelectionMetadata::VerticalLink { path: path.clone() }
            }
            _ => SelectionMetadata::None,
        }
    }
}

/// A row together with its keyboard-navigation index
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRow {
    pub index: usize,
    pub suggestion: AggregatedSuggestion,
}
