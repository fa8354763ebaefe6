//! UI event handlers

use std::sync::Arc;
use std::time::Duration;

use super::SearchBarController;
use super::types::{AutocompleteResult, PanelState, SelectOutcome, SubmitHandle};
use crate::client::{DispatchedQuery, NavigationState, SearchContext};
use crate::suggestions::{AggregatedSuggestion, SearchIntent, SelectionMetadata};

impl SearchBarController {
    /// Input gained focus: open the panel seeded with the committed query
    pub fn on_focus(&mut self) {
        let committed = self.client.committed_query();
        self.input_text = committed.clone();
        self.live_query = committed;
        self.highlighted = None;
        self.state = PanelState::Focused;

        self.issue_autocomplete();
        self.issue_previews();
        self.refresh();
    }

    /// Input text changed
    ///
    /// Each call supersedes the previous fetches; their results are dropped
    /// when they arrive.
    pub fn on_change(&mut self, text: &str) {
        self.input_text = text.to_string();
        self.live_query = text.to_string();
        self.highlighted = None;
        self.state = PanelState::Typing;

        self.issue_autocomplete();
        self.issue_previews();
        self.refresh();
    }

    /// Keyboard navigation over the rows
    ///
    /// The highlighted row's text is shown in the input; the live query is
    /// left alone. `None` restores the live query.
    pub fn on_highlight(&mut self, index: Option<usize>) -> Option<&AggregatedSuggestion> {
        match index.and_then(|i| self.aggregation.get(i).map(|row| (i, row.value().to_string()))) {
            Some((i, value)) => {
                self.highlighted = Some(i);
                self.input_text = value;
            }
            None => {
                self.highlighted = None;
                self.input_text = self.live_query.clone();
            }
        }
        self.highlighted.and_then(|i| self.aggregation.get(i))
    }

    /// Submit whatever is in the input
    pub fn on_submit(&mut self) -> SubmitHandle {
        let text = self.input_text.clone();
        self.dispatch_text(&text)
    }

    /// A row was chosen
    pub fn on_select(&mut self, index: usize) -> SelectOutcome {
        let Some(row) = self.aggregation.get(index).cloned() else {
            log::debug!("Ignoring selection of missing row {}", index);
            return SelectOutcome::Ignored;
        };
        let value = row.value().to_string();

        match row.selection_metadata() {
            SelectionMetadata::VerticalLink { path } => {
                self.input_text = value.clone();
                self.close_panel(PanelState::Submitted);
                self.router.navigate(&path, NavigationState { query: value });
                SelectOutcome::Navigated { path }
            }
            SelectionMetadata::None => match row {
                AggregatedSuggestion::EntityPreview(_) => {
                    self.close_panel(PanelState::Idle);
                    SelectOutcome::Closed
                }
                _ => {
                    self.input_text = value.clone();
                    self.live_query = value.clone();
                    SelectOutcome::Dispatched(self.dispatch_text(&value))
                }
            },
        }
    }

    /// The panel was opened or dismissed by the user
    ///
    /// Dismissing without a selection keeps the suggestions consistent with
    /// whatever text remains in the input.
    pub fn on_toggle(&mut self, closing: bool) {
        if closing {
            if !self.state.is_open() {
                self.state = PanelState::Idle;
                return;
            }
            self.live_query = self.input_text.clone();
            self.issue_autocomplete();
            self.close_panel(PanelState::Idle);
        } else if !self.state.is_open() {
            self.state = if self.aggregation.has_items {
                PanelState::SuggestionsOpen
            } else {
                PanelState::Empty
            };
        }
    }

    /// Turning recent searches off clears the stored list immediately
    pub fn set_recent_searches_enabled(&mut self, enabled: bool) {
        if !enabled && !self.recent.is_empty() {
            self.recent.clear();
            self.persist_recent();
        }
        self.recent_enabled = enabled;
        self.refresh();
    }

    pub fn set_vertical_context(&mut self, context: SearchContext) {
        self.context = context;
        self.refresh();
    }

    fn close_panel(&mut self, state: PanelState) {
        self.highlighted = None;
        self.state = state;
    }

    fn dispatch_text(&mut self, text: &str) -> SubmitHandle {
        let text = text.trim().to_string();

        if self.recent_enabled && self.recent.record(&text) {
            self.persist_recent();
        }

        let intent_flagged = self
            .autocomplete
            .current()
            .is_some_and(|r| r.query.trim() == text && r.response.has_intent(SearchIntent::NearMe));

        let query = DispatchedQuery::new(text, self.context.clone());
        let policy = Arc::clone(&self.near_me);
        let join = tokio::spawn(async move { policy.dispatch(query, intent_flagged).await });

        self.close_panel(PanelState::Submitted);
        self.refresh();
        SubmitHandle::new(join)
    }

    fn issue_autocomplete(&mut self) {
        let query = self.live_query.clone();
        let fetch = self.client.autocomplete(&query, &self.context);
        self.autocomplete.issue(move |_| async move {
            fetch
                .await
                .map(|response| AutocompleteResult { query, response })
        });
    }

    /// Debounced: a fetch superseded during the delay is never sent
    fn issue_previews(&mut self) {
        let Some(provider) = &self.previews else {
            return;
        };
        let provider = Arc::clone(provider);
        let query = self.live_query.clone();
        let context = self.context.clone();
        let delay = Duration::from_millis(self.config.entity_preview_debounce_ms);

        self.entity_previews.issue(move |ticket| async move {
            tokio::time::sleep(delay).await;
            if ticket.is_superseded() {
                return Ok(Vec::new());
            }
            provider.previews(&query, &context).await
        });
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
