//! Search bar controller
//!
//! Composition root: reacts to UI events, drives the autocomplete and preview
//! synchronizers, records recent searches, and dispatches queries through the
//! near-me policy. Rendering reads the derived [`Aggregation`].

mod events;
mod types;
mod updates;

use std::path::PathBuf;
use std::sync::Arc;

pub use types::{AutocompleteResult, ControllerUpdate, PanelState, SelectOutcome, SubmitHandle};

use crate::client::{EntityPreviewProvider, Router, SearchClient, SearchContext};
use crate::config::SearchBarConfig;
use crate::error::SearchError;
use crate::history::{CloseMatch, FuzzyCloseMatch, RecentSearchEntry, RecentSearchStore, storage};
use crate::near_me::NearMeDispatchPolicy;
use crate::request::RequestSynchronizer;
use crate::suggestions::{Aggregation, EnglishPhrases, EntityPreview, PhraseFormatter, announcement};

/// Maps a vertical key to the label shown on its link rows
pub type VerticalLabelFn = dyn Fn(&str) -> String + Send + Sync;

pub struct SearchBarController {
    config: SearchBarConfig,
    client: Arc<dyn SearchClient>,
    router: Arc<dyn Router>,
    near_me: Arc<NearMeDispatchPolicy>,
    previews: Option<Arc<dyn EntityPreviewProvider>>,
    close_match: Box<dyn CloseMatch>,
    phrases: Box<dyn PhraseFormatter>,
    vertical_label: Option<Arc<VerticalLabelFn>>,

    recent: RecentSearchStore,
    recent_enabled: bool,
    persist_path: Option<PathBuf>,

    autocomplete: RequestSynchronizer<AutocompleteResult, SearchError>,
    entity_previews: RequestSynchronizer<Vec<EntityPreview>, SearchError>,

    context: SearchContext,
    state: PanelState,
    input_text: String,
    live_query: String,
    highlighted: Option<usize>,
    aggregation: Aggregation,
}

impl SearchBarController {
    /// Create a controller
    ///
    /// When `persist_recent_searches` is set, the recent-search list is loaded
    /// from and saved to the default recent-searches file.
    pub fn new(
        config: SearchBarConfig,
        client: Arc<dyn SearchClient>,
        router: Arc<dyn Router>,
        near_me: NearMeDispatchPolicy,
    ) -> Self {
        let persist_path = if config.persist_recent_searches {
            storage::recent_searches_path()
        } else {
            None
        };
        let abort = config.abort_superseded_requests;

        let mut controller = Self {
            recent: RecentSearchStore::new(config.recent_searches_limit),
            recent_enabled: !config.hide_recent_searches,
            persist_path: None,
            client,
            router,
            near_me: Arc::new(near_me),
            previews: None,
            close_match: Box::new(FuzzyCloseMatch::new()),
            phrases: Box::new(EnglishPhrases),
            vertical_label: None,
            autocomplete: RequestSynchronizer::new(abort),
            entity_previews: RequestSynchronizer::new(abort),
            context: SearchContext::default(),
            state: PanelState::Idle,
            input_text: String::new(),
            live_query: String::new(),
            highlighted: None,
            aggregation: Aggregation::default(),
            config,
        };
        if let Some(path) = persist_path {
            controller = controller.with_persist_path(path);
        }
        controller
    }

    /// Enable entity previews; without a provider no preview fetch is issued
    pub fn with_entity_previews(mut self, provider: Arc<dyn EntityPreviewProvider>) -> Self {
        self.previews = Some(provider);
        self
    }

    pub fn with_close_match(mut self, close_match: Box<dyn CloseMatch>) -> Self {
        self.close_match = close_match;
        self
    }

    pub fn with_phrase_formatter(mut self, phrases: Box<dyn PhraseFormatter>) -> Self {
        self.phrases = phrases;
        self
    }

    /// Custom vertical labels; takes precedence over `vertical_labels` config
    pub fn with_vertical_label(mut self, label: Arc<VerticalLabelFn>) -> Self {
        self.vertical_label = Some(label);
        self
    }

    pub fn with_context(mut self, context: SearchContext) -> Self {
        self.context = context;
        self
    }

    /// Load recent searches from `path` and save them back after each change
    pub fn with_persist_path(mut self, path: PathBuf) -> Self {
        if self.recent_enabled {
            let entries = storage::load_recent_searches_from_path(&path);
            self.recent = RecentSearchStore::from_entries(entries, self.config.recent_searches_limit);
        }
        self.persist_path = Some(path);
        self
    }

    /// Seed the recent-search list (newest first)
    pub fn with_recent_searches(mut self, entries: Vec<RecentSearchEntry>) -> Self {
        if self.recent_enabled {
            self.recent = RecentSearchStore::from_entries(entries, self.config.recent_searches_limit);
        }
        self
    }

    pub fn config(&self) -> &SearchBarConfig {
        &self.config
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.config.placeholder.as_deref()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Text currently shown in the input
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Query suggestions are fetched for
    pub fn live_query(&self) -> &str {
        &self.live_query
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    pub fn recent_searches(&self) -> &[RecentSearchEntry] {
        self.recent.list()
    }

    pub fn recent_searches_enabled(&self) -> bool {
        self.recent_enabled
    }

    /// True while the latest autocomplete request is unresolved
    pub fn is_loading(&self) -> bool {
        self.autocomplete.is_pending()
    }

    pub fn near_me(&self) -> &NearMeDispatchPolicy {
        &self.near_me
    }

    /// Screen-reader summary of the panel
    pub fn announcement(&self) -> String {
        announcement(&self.aggregation.counts, self.phrases.as_ref())
    }

    fn label_for(&self, key: &str) -> String {
        match &self.vertical_label {
            Some(label) => label(key),
            None => self.config.vertical_label(key),
        }
    }

    fn persist_recent(&self) {
        let Some(path) = &self.persist_path else {
            return;
        };
        if let Err(e) = storage::save_recent_searches_to_path(path, self.recent.list()) {
            log::warn!("Failed to save recent searches: {}", e);
        }
    }
}
