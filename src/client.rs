//! External collaborators
//!
//! Traits for the pieces this crate drives but does not implement: the
//! search-state client, entity previews, geolocation, and routing.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::GeolocationOptions;
use crate::error::{GeolocationError, SearchError};
use crate::suggestions::{EntityPreview, SuggestionResponse};

/// Whether search spans every category or is scoped to one vertical
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchContext {
    #[default]
    Universal,
    Vertical(String),
}

impl SearchContext {
    pub fn is_vertical(&self) -> bool {
        matches!(self, SearchContext::Vertical(_))
    }

    pub fn vertical_key(&self) -> Option<&str> {
        match self {
            SearchContext::Vertical(key) => Some(key),
            SearchContext::Universal => None,
        }
    }
}

/// Resolved position of the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy_m: Option<f64>,
}

/// A query as handed to the search client
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedQuery {
    pub text: String,
    /// Present when a near-me lookup succeeded
    pub location: Option<Coordinates>,
    pub context: SearchContext,
}

impl DispatchedQuery {
    pub fn new(text: impl Into<String>, context: SearchContext) -> Self {
        Self {
            text: text.into(),
            location: None,
            context,
        }
    }
}

/// State passed along with a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub query: String,
}

/// The search-state client the bar sits on top of
pub trait SearchClient: Send + Sync {
    fn autocomplete(
        &self,
        query: &str,
        context: &SearchContext,
    ) -> BoxFuture<'static, Result<SuggestionResponse, SearchError>>;

    fn execute_query(&self, query: DispatchedQuery) -> BoxFuture<'static, Result<(), SearchError>>;

    /// The query the search state currently holds
    fn committed_query(&self) -> String;
}

/// Source of rich entity previews shown under the suggestions
pub trait EntityPreviewProvider: Send + Sync {
    fn previews(
        &self,
        query: &str,
        context: &SearchContext,
    ) -> BoxFuture<'static, Result<Vec<EntityPreview>, SearchError>>;
}

/// Platform location lookup, including its permission prompt
pub trait GeolocationProvider: Send + Sync {
    fn locate(
        &self,
        options: &GeolocationOptions,
    ) -> BoxFuture<'static, Result<Coordinates, GeolocationError>>;
}

pub trait Router: Send + Sync {
    fn navigate(&self, path: &str, state: NavigationState);
}
