//! In-memory collaborators and the line protocol used by the `searchbar`
//! binary

use std::sync::Mutex;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::client::{
    Coordinates, DispatchedQuery, GeolocationProvider, NavigationState, Router, SearchClient,
    SearchContext,
};
use crate::config::GeolocationOptions;
use crate::controller::SearchBarController;
use crate::error::{GeolocationError, SearchBarError, SearchError};
use crate::suggestions::{AggregatedSuggestion, Suggestion, SuggestionResponse};

const MAX_RESULTS: usize = 10;

/// Autocomplete over a fixed list of suggestions
///
/// Case-insensitive substring match, prefix matches first.
pub struct CorpusSearchClient {
    corpus: Vec<Suggestion>,
    latency: Duration,
    committed: Mutex<String>,
}

impl CorpusSearchClient {
    pub fn new(corpus: Vec<Suggestion>, latency: Duration) -> Self {
        Self {
            corpus,
            latency,
            committed: Mutex::new(String::new()),
        }
    }

    /// Parse a JSON array of `{ "value": .., "vertical_keys": [..] }`
    pub fn from_json(json: &str, latency: Duration) -> Result<Self, SearchBarError> {
        let corpus: Vec<Suggestion> = serde_json::from_str(json)?;
        Ok(Self::new(corpus, latency))
    }

    pub fn matches(&self, query: &str, context: &SearchContext) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        let in_context = |s: &&Suggestion| match context.vertical_key() {
            Some(key) => s.vertical_keys.iter().any(|k| k == key),
            None => true,
        };

        let (mut prefix, contains): (Vec<&Suggestion>, Vec<&Suggestion>) = self
            .corpus
            .iter()
            .filter(in_context)
            .filter(|s| s.value.to_lowercase().contains(&needle))
            .partition(|s| s.value.to_lowercase().starts_with(&needle));
        prefix.extend(contains);

        prefix.into_iter().take(MAX_RESULTS).cloned().collect()
    }
}

impl SearchClient for CorpusSearchClient {
    fn autocomplete(
        &self,
        query: &str,
        context: &SearchContext,
    ) -> BoxFuture<'static, Result<SuggestionResponse, SearchError>> {
        let response = SuggestionResponse::new(self.matches(query, context));
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;
            Ok(response)
        }
        .boxed()
    }

    fn execute_query(&self, query: DispatchedQuery) -> BoxFuture<'static, Result<(), SearchError>> {
        log::info!("Executing {:?} (location: {:?})", query.text, query.location);
        *self.committed.lock().unwrap_or_else(|e| e.into_inner()) = query.text;
        async { Ok(()) }.boxed()
    }

    fn committed_query(&self) -> String {
        self.committed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Geolocation with a preset answer; `None` behaves like an unavailable device
pub struct FixedGeolocation {
    location: Option<Coordinates>,
}

impl FixedGeolocation {
    pub fn new(location: Option<Coordinates>) -> Self {
        Self { location }
    }
}

impl GeolocationProvider for FixedGeolocation {
    fn locate(
        &self,
        _options: &GeolocationOptions,
    ) -> BoxFuture<'static, Result<Coordinates, GeolocationError>> {
        let result = self
            .location
            .ok_or_else(|| GeolocationError::Unavailable("no location configured".to_string()));
        async move { result }.boxed()
    }
}

/// Router that remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingRouter {
    navigations: Mutex<Vec<String>>,
}

impl RecordingRouter {
    /// Take every recorded path, oldest first
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.navigations.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Router for RecordingRouter {
    fn navigate(&self, path: &str, state: NavigationState) {
        log::info!("Navigating to {} for {:?}", path, state.query);
        self.navigations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
    }
}

/// One line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Change(String),
    Submit,
    Select(usize),
    Highlight(Option<usize>),
    Focus,
    Close,
    Open,
    ClearRecent,
    Quit,
    Unknown(String),
}

/// Plain text is a change; `!` or `:submit` submits; other `:` words are
/// panel commands
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line == "!" {
        return Command::Submit;
    }
    let Some(command) = line.strip_prefix(':') else {
        return Command::Change(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("submit"), None) => Command::Submit,
        (Some("focus"), None) => Command::Focus,
        (Some("close"), None) => Command::Close,
        (Some("open"), None) => Command::Open,
        (Some("clear-recent"), None) => Command::ClearRecent,
        (Some("quit") | Some("q"), None) => Command::Quit,
        (Some("highlight"), None) => Command::Highlight(None),
        (Some("highlight"), Some(n)) => match n.parse() {
            Ok(index) => Command::Highlight(Some(index)),
            Err(_) => Command::Unknown(line.to_string()),
        },
        (Some("select"), Some(n)) => match n.parse() {
            Ok(index) => Command::Select(index),
            Err(_) => Command::Unknown(line.to_string()),
        },
        _ => Command::Unknown(line.to_string()),
    }
}

/// Text rendering of the panel, one row per line
pub fn render_panel(controller: &SearchBarController) -> String {
    let mut out = format!("> {}\n", controller.input_text());
    if !controller.state().is_open() {
        return out;
    }

    let highlighted = controller.highlighted();
    for row in &controller.aggregation().rows {
        let marker = if highlighted == Some(row.index) { '*' } else { ' ' };
        let line = match &row.suggestion {
            AggregatedSuggestion::RecentSearch(entry) => format!("recent  {}", entry.query),
            AggregatedSuggestion::QuerySuggestion(s) => format!("suggest {}", s.value),
            AggregatedSuggestion::VerticalLink { label, path, .. } => {
                format!("  in {} -> {}", label, path)
            }
            AggregatedSuggestion::EntityPreview(p) => format!("preview {}", p.title),
        };
        out.push_str(&format!("{}{:>2} {}\n", marker, row.index, line));
    }
    out.push_str(&format!("({})\n", controller.announcement()));
    out
}

/// Suggestions used when no corpus file is given
pub fn default_corpus() -> Vec<Suggestion> {
    vec![
        Suggestion::with_verticals("atm near me", ["locations"]),
        Suggestion::with_verticals("bank hours", ["locations", "faqs"]),
        Suggestion::with_verticals("bank holidays", ["faqs"]),
        Suggestion::new("banking app"),
        Suggestion::with_verticals("credit card", ["products"]),
        Suggestion::with_verticals("credit score", ["faqs"]),
        Suggestion::with_verticals("mortgage rates", ["products"]),
        Suggestion::with_verticals("savings account", ["products"]),
    ]
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod demo_tests;
