use tokio::task::JoinHandle;

use crate::error::SearchError;
use crate::near_me::DispatchOutcome;
use crate::suggestions::SuggestionResponse;

/// Autocomplete response together with the query that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteResult {
    pub query: String,
    pub response: SuggestionResponse,
}

/// Where the search bar is in its interaction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Focused,
    Typing,
    SuggestionsOpen,
    Empty,
    Submitted,
}

impl PanelState {
    /// Whether the suggestion panel is showing
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PanelState::Focused
                | PanelState::Typing
                | PanelState::SuggestionsOpen
                | PanelState::Empty
        )
    }
}

/// Result of applying one completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerUpdate {
    /// New autocomplete suggestions are showing
    Suggestions,
    /// New entity previews are showing
    Previews,
    /// A superseded response arrived and was dropped
    Stale,
    /// The latest fetch failed; the panel keeps what it had
    Error(SearchError),
}

/// A query dispatch running in the background
#[derive(Debug)]
pub struct SubmitHandle {
    join: JoinHandle<Result<DispatchOutcome, SearchError>>,
}

impl SubmitHandle {
    pub(super) fn new(join: JoinHandle<Result<DispatchOutcome, SearchError>>) -> Self {
        Self { join }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the dispatch to finish
    pub async fn outcome(self) -> Result<DispatchOutcome, SearchError> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Dispatch task failed: {}", e);
                Err(SearchError::Aborted)
            }
        }
    }
}

/// What selecting a row did
#[derive(Debug)]
pub enum SelectOutcome {
    /// A search was dispatched for the row's text
    Dispatched(SubmitHandle),
    /// The router was sent to a vertical page
    Navigated { path: String },
    /// An entity preview was chosen; the panel closed
    Closed,
    /// No row at that index
    Ignored,
}
