use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::intent::{NearMeIntent, PhraseNearMeIntent};
use crate::client::{Coordinates, DispatchedQuery, GeolocationProvider, SearchClient};
use crate::config::GeolocationOptions;
use crate::error::{GeolocationError, SearchError};
use crate::notification::{Notification, Notifier};

type LocationLookup = Shared<BoxFuture<'static, Result<Coordinates, GeolocationError>>>;

/// Location state for the session
#[derive(Default)]
struct NearMeRequestState {
    /// Lookup currently awaiting the platform, tagged with its id
    in_flight: Option<(u64, LocationLookup)>,
    location: Option<Coordinates>,
    next_lookup_id: u64,
}

/// What was actually sent to the search client
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub query: DispatchedQuery,
    /// Set when a near-me query went out without a location
    pub fallback: Option<GeolocationError>,
}

/// Resolves location for near-me queries before handing them to the client
///
/// The state lock is only held between suspension points, so concurrent
/// dispatches on one instance can share a single outstanding lookup. The
/// in-flight slot is cleared by the lookup itself once the platform answers;
/// each waiter applies its own timeout.
pub struct NearMeDispatchPolicy {
    client: Arc<dyn SearchClient>,
    geolocation: Arc<dyn GeolocationProvider>,
    intent: Arc<dyn NearMeIntent>,
    notifier: Arc<dyn Notifier>,
    options: GeolocationOptions,
    state: Arc<Mutex<NearMeRequestState>>,
}

impl NearMeDispatchPolicy {
    pub fn new(
        client: Arc<dyn SearchClient>,
        geolocation: Arc<dyn GeolocationProvider>,
        notifier: Arc<dyn Notifier>,
        options: GeolocationOptions,
    ) -> Self {
        Self {
            client,
            geolocation,
            intent: Arc::new(PhraseNearMeIntent::default()),
            notifier,
            options,
            state: Arc::new(Mutex::new(NearMeRequestState::default())),
        }
    }

    /// Replace the near-me predicate
    pub fn with_intent(mut self, intent: Arc<dyn NearMeIntent>) -> Self {
        self.intent = intent;
        self
    }

    /// Whether dispatching `text` involves the location
    ///
    /// `intent_flagged` is the backend's own near-me verdict for the input.
    pub fn needs_location(&self, text: &str, intent_flagged: bool) -> bool {
        intent_flagged || self.intent.is_near_me(text)
    }

    /// Location resolved earlier in this session
    pub fn resolved_location(&self) -> Option<Coordinates> {
        lock_state(&self.state).location
    }

    /// True while a platform lookup is outstanding
    pub fn is_locating(&self) -> bool {
        lock_state(&self.state).in_flight.is_some()
    }

    /// Send a query to the search client, attaching the location if needed
    ///
    /// Location failures are reported through the notifier and the query goes
    /// out unchanged. Execution failures are returned as-is.
    pub async fn dispatch(
        &self,
        mut query: DispatchedQuery,
        intent_flagged: bool,
    ) -> Result<DispatchOutcome, SearchError> {
        let mut fallback = None;

        if self.needs_location(&query.text, intent_flagged) {
            match self.resolve_location().await {
                Ok(location) => query.location = Some(location),
                Err(e) => {
                    log::warn!("Dispatching {:?} without location: {}", query.text, e);
                    self.notifier.notify(Notification::warning(format!(
                        "Could not use your location ({}). Showing results without it.",
                        e
                    )));
                    fallback = Some(e);
                }
            }
        }

        log::debug!(
            "Dispatching query {:?} (location: {})",
            query.text,
            query.location.is_some()
        );
        self.client.execute_query(query.clone()).await?;

        Ok(DispatchOutcome { query, fallback })
    }

    async fn resolve_location(&self) -> Result<Coordinates, GeolocationError> {
        let lookup = {
            let mut state = lock_state(&self.state);
            if let Some(location) = state.location {
                return Ok(location);
            }
            match state.in_flight.clone() {
                Some((id, lookup)) => {
                    log::debug!("Joining in-flight location lookup {}", id);
                    lookup
                }
                None => {
                    state.next_lookup_id += 1;
                    let id = state.next_lookup_id;
                    let lookup = self.start_lookup(id);
                    state.in_flight = Some((id, lookup.clone()));
                    log::debug!("Started location lookup {}", id);
                    lookup
                }
            }
        };

        let timeout_ms = self.options.timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), lookup).await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout(timeout_ms)),
        }
    }

    /// Wrap one platform lookup so it records its own outcome when it settles
    ///
    /// The lookup is driven by its own task, so it runs to completion even
    /// when every waiter has given up on it.
    fn start_lookup(&self, id: u64) -> LocationLookup {
        let state: Weak<Mutex<NearMeRequestState>> = Arc::downgrade(&self.state);
        let locate = self.geolocation.locate(&self.options);
        let lookup = async move {
            let result = locate.await;
            if let Some(state) = state.upgrade() {
                let mut state = lock_state(&state);
                if state.in_flight.as_ref().is_some_and(|(current, _)| *current == id) {
                    state.in_flight = None;
                }
                if let Ok(location) = result {
                    state.location = Some(location);
                }
            }
            log::debug!("Location lookup {} settled", id);
            result
        }
        .boxed()
        .shared();

        tokio::spawn(lookup.clone());
        lookup
    }
}

fn lock_state(state: &Mutex<NearMeRequestState>) -> MutexGuard<'_, NearMeRequestState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
