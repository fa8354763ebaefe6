use super::types::{AggregatedSuggestion, EntityPreview, Suggestion, SuggestionRow};
use crate::client::SearchContext;
use crate::history::RecentSearchEntry;

/// Everything the panel is built from
pub struct AggregationInput<'a> {
    pub recent_searches: &'a [RecentSearchEntry],
    pub suggestions: &'a [Suggestion],
    pub vertical_linking_enabled: bool,
    pub context: &'a SearchContext,
    /// `None` when previews are not configured; the preview step is skipped
    pub entity_previews: Option<&'a [EntityPreview]>,
    pub vertical_label: &'a dyn Fn(&str) -> String,
}

/// Row counts announced to screen readers as two separate phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibleCounts {
    pub recent: usize,
    /// Query suggestions plus their vertical links
    pub autocomplete: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    pub rows: Vec<SuggestionRow>,
    pub has_items: bool,
    pub counts: AccessibleCounts,
}

impl Aggregation {
    pub fn get(&self, index: usize) -> Option<&AggregatedSuggestion> {
        self.rows.get(index).map(|row| &row.suggestion)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Path a vertical link row navigates to
///
/// The suggestion value is used literally.
pub fn vertical_link_path(vertical_key: &str, value: &str) -> String {
    format!("/{}?query={}", vertical_key, value)
}

/// Build the ordered panel
///
/// Order: recent searches (never in a vertical context), then each query
/// suggestion immediately followed by its vertical links, then entity
/// previews. Indices are contiguous from zero.
pub fn aggregate(input: &AggregationInput<'_>) -> Aggregation {
    let mut items: Vec<AggregatedSuggestion> = Vec::new();
    let mut counts = AccessibleCounts::default();

    if !input.context.is_vertical() {
        for entry in input.recent_searches {
            items.push(AggregatedSuggestion::RecentSearch(entry.clone()));
        }
        counts.recent = input.recent_searches.len();
    }

    let show_links = input.vertical_linking_enabled && !input.context.is_vertical();
    for suggestion in input.suggestions {
        items.push(AggregatedSuggestion::QuerySuggestion(suggestion.clone()));
        counts.autocomplete += 1;

        if !show_links {
            continue;
        }
        for vertical_key in &suggestion.vertical_keys {
            items.push(AggregatedSuggestion::VerticalLink {
                suggestion: suggestion.clone(),
                vertical_key: vertical_key.clone(),
                label: (input.vertical_label)(vertical_key),
                path: vertical_link_path(vertical_key, &suggestion.value),
            });
            counts.autocomplete += 1;
        }
    }

    if let Some(previews) = input.entity_previews {
        items.extend(previews.iter().cloned().map(AggregatedSuggestion::EntityPreview));
    }

    let rows: Vec<SuggestionRow> = items
        .into_iter()
        .enumerate()
        .map(|(index, suggestion)| SuggestionRow { index, suggestion })
        .collect();

    Aggregation {
        has_items: !rows.is_empty(),
        rows,
        counts,
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod aggregator_tests;
