//! Headless search-bar core
//!
//! Autocomplete request sequencing, recent-search history, suggestion
//! aggregation, and near-me query dispatch, driven by a controller that
//! reacts to input events. Rendering, routing, geolocation, and the search
//! backend are supplied by the host through the traits in [`client`].

pub mod client;
pub mod config;
pub mod controller;
pub mod demo;
pub mod error;
pub mod history;
pub mod near_me;
pub mod notification;
pub mod request;
pub mod suggestions;


pub use client::{
    Coordinates, DispatchedQuery, EntityPreviewProvider, GeolocationProvider, NavigationState,
    Router, SearchClient, SearchContext,
};
pub use config::SearchBarConfig;
pub use controller::{ControllerUpdate, PanelState, SearchBarController, SelectOutcome};
pub use error::{GeolocationError, SearchBarError, SearchError};
