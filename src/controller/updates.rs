//! Applying fetch completions to the panel

use super::SearchBarController;
use super::types::{ControllerUpdate, PanelState};
use crate::error::SearchError;
use crate::request::Resolution;
use crate::suggestions::{Aggregation, AggregationInput, aggregate};

enum Completed {
    Autocomplete(Result<Resolution, SearchError>),
    Previews(Result<Resolution, SearchError>),
}

impl SearchBarController {
    /// Wait for the next fetch to complete and apply it
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_update(&mut self) -> Option<ControllerUpdate> {
        let completed = tokio::select! {
            Some(r) = self.autocomplete.next_resolution() => Completed::Autocomplete(r),
            Some(r) = self.entity_previews.next_resolution() => Completed::Previews(r),
            else => return None,
        };
        Some(self.apply(completed))
    }

    /// Apply every completion that has already arrived
    pub fn pump(&mut self) -> Vec<ControllerUpdate> {
        let mut completed: Vec<Completed> = self
            .autocomplete
            .drain()
            .into_iter()
            .map(Completed::Autocomplete)
            .collect();
        completed.extend(self.entity_previews.drain().into_iter().map(Completed::Previews));

        completed.into_iter().map(|c| self.apply(c)).collect()
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) -> Vec<ControllerUpdate> {
        let mut updates = Vec::new();
        while let Some(update) = self.next_update().await {
            updates.push(update);
        }
        updates
    }

    fn apply(&mut self, completed: Completed) -> ControllerUpdate {
        match completed {
            Completed::Autocomplete(Ok(Resolution::Published { seq })) => {
                log::debug!("Showing autocomplete response {}", seq);
                self.refresh();
                self.sync_panel_state();
                ControllerUpdate::Suggestions
            }
            Completed::Previews(Ok(Resolution::Published { .. })) => {
                self.refresh();
                self.sync_panel_state();
                ControllerUpdate::Previews
            }
            Completed::Autocomplete(Ok(Resolution::Stale { .. }))
            | Completed::Previews(Ok(Resolution::Stale { .. })) => ControllerUpdate::Stale,
            Completed::Autocomplete(Err(e)) | Completed::Previews(Err(e)) => {
                log::debug!("Suggestion fetch failed: {}", e);
                ControllerUpdate::Error(e)
            }
        }
    }

    /// An open panel shows either rows or the empty state
    fn sync_panel_state(&mut self) {
        if self.state.is_open() {
            self.state = if self.aggregation.has_items {
                PanelState::SuggestionsOpen
            } else {
                PanelState::Empty
            };
        }
    }

    /// Re-derive the panel from current state
    pub(super) fn refresh(&mut self) {
        self.aggregation = self.build_aggregation();
        if self
            .highlighted
            .is_some_and(|i| i >= self.aggregation.len())
        {
            self.highlighted = None;
        }
    }

    fn build_aggregation(&self) -> Aggregation {
        let recent = if self.recent_enabled {
            self.recent
                .filter(&self.live_query, &self.context, self.close_match.as_ref())
        } else {
            Vec::new()
        };
        let suggestions = self
            .autocomplete
            .current()
            .map(|r| r.response.results.as_slice())
            .unwrap_or(&[]);
        let previews = self.previews.as_ref().map(|_| {
            self.entity_previews
                .current()
                .map(Vec::as_slice)
                .unwrap_or(&[])
        });
        let label = |key: &str| self.label_for(key);

        aggregate(&AggregationInput {
            recent_searches: &recent,
            suggestions,
            vertical_linking_enabled: !self.config.hide_vertical_links,
            context: &self.context,
            entity_previews: previews,
            vertical_label: &label,
        })
    }
}

#[cfg(test)]
#[path = "updates_tests.rs"]
mod updates_tests;
