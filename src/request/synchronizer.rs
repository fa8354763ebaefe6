use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tokio_util::sync::CancellationToken;

/// Handle for one issued request
///
/// Carries the sequence number assigned at issue time. A fetch future can use
/// [`RequestTicket::is_superseded`] to skip work that will be discarded anyway.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    seq: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// True once a newer request has been issued by the same synchronizer
    pub fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.seq
    }
}

/// What happened to a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result belonged to the latest request and is now current
    Published { seq: u64 },
    /// A newer request exists; the result was dropped
    Stale { seq: u64 },
}

enum Outcome<T, E> {
    Finished(Result<T, E>),
    Aborted,
    Panicked,
}

struct Completion<T, E> {
    seq: u64,
    outcome: Outcome<T, E>,
}

/// Publishes only the result of the most recently issued request
///
/// Fetches run as tokio tasks and report back over an internal channel, so
/// the synchronizer itself is only ever mutated by its owner. Superseded
/// requests keep running and are discarded when they arrive, unless abort
/// mode is enabled, in which case issuing a request cancels the previous one.
/// A fetch that panics still reports back and resolves as stale.
pub struct RequestSynchronizer<T, E> {
    latest: Arc<AtomicU64>,
    current: Option<T>,
    current_seq: Option<u64>,
    awaiting_latest: bool,
    outstanding: usize,
    abort_superseded: bool,
    in_flight: Option<CancellationToken>,
    completion_tx: UnboundedSender<Completion<T, E>>,
    completion_rx: UnboundedReceiver<Completion<T, E>>,
}

impl<T, E> std::fmt::Debug for RequestSynchronizer<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSynchronizer")
            .field("latest_issued", &self.latest.load(Ordering::Acquire))
            .field("current_seq", &self.current_seq)
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}

impl<T, E> Default for RequestSynchronizer<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T, E> RequestSynchronizer<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a synchronizer
    ///
    /// # Arguments
    /// * `abort_superseded` - Cancel the previous in-flight task when a new
    ///   request is issued instead of letting it finish and discarding it
    pub fn new(abort_superseded: bool) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            current: None,
            current_seq: None,
            awaiting_latest: false,
            outstanding: 0,
            abort_superseded,
            in_flight: None,
            completion_tx,
            completion_rx,
        }
    }

    /// Issue a new request, superseding every earlier one
    ///
    /// `fetch` receives the ticket for the request and returns the future to
    /// run. Must be called from within a tokio runtime.
    pub fn issue<F, Fut>(&mut self, fetch: F) -> RequestTicket
    where
        F: FnOnce(RequestTicket) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let seq = self.latest.load(Ordering::Acquire).wrapping_add(1);
        self.latest.store(seq, Ordering::Release);

        if let Some(previous) = self.in_flight.take()
            && self.abort_superseded
        {
            previous.cancel();
            log::debug!("Aborted request superseded by {}", seq);
        }

        let ticket = RequestTicket {
            seq,
            latest: Arc::clone(&self.latest),
        };
        let future = fetch(ticket.clone());

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.outstanding += 1;
        self.awaiting_latest = true;

        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => Outcome::Aborted,
                result = AssertUnwindSafe(future).catch_unwind() => match result {
                    Ok(result) => Outcome::Finished(result),
                    Err(_) => Outcome::Panicked,
                },
            };
            // Receiver gone means the owner was dropped; nothing to report to
            let _ = tx.send(Completion { seq, outcome });
        });

        ticket
    }

    /// Wait for the next completion and apply the sequencing rule
    ///
    /// Returns `None` when nothing is outstanding. An `Err` is the failure of
    /// the latest request, passed through untouched.
    pub async fn next_resolution(&mut self) -> Option<Result<Resolution, E>> {
        if self.outstanding == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Apply every completion that has already arrived without waiting
    pub fn drain(&mut self) -> Vec<Result<Resolution, E>> {
        let mut resolutions = Vec::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => resolutions.push(self.apply(completion)),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        resolutions
    }

    fn apply(&mut self, completion: Completion<T, E>) -> Result<Resolution, E> {
        self.outstanding = self.outstanding.saturating_sub(1);
        let seq = completion.seq;
        let latest = self.latest_issued();

        let result = match completion.outcome {
            Outcome::Finished(result) => result,
            Outcome::Aborted => {
                log::debug!("Request {} was aborted", seq);
                return Ok(Resolution::Stale { seq });
            }
            Outcome::Panicked => {
                log::warn!("Request {} panicked before completing", seq);
                if seq == latest {
                    self.awaiting_latest = false;
                    self.in_flight = None;
                }
                return Ok(Resolution::Stale { seq });
            }
        };

        if seq != latest {
            log::debug!("Discarding stale response {} (latest: {})", seq, latest);
            return Ok(Resolution::Stale { seq });
        }

        self.awaiting_latest = false;
        self.in_flight = None;
        match result {
            Ok(value) => {
                self.current = Some(value);
                self.current_seq = Some(seq);
                Ok(Resolution::Published { seq })
            }
            Err(e) => Err(e),
        }
    }

    /// The most recently published value
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Sequence number of the published value
    pub fn current_seq(&self) -> Option<u64> {
        self.current_seq
    }

    pub fn latest_issued(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// True while the latest issued request has not resolved
    pub fn is_pending(&self) -> bool {
        self.awaiting_latest
    }

    /// Number of spawned tasks that have not reported back yet
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Drop the published value; in-flight requests are unaffected
    pub fn clear(&mut self) {
        self.current = None;
        self.current_seq = None;
    }
}

impl<T, E> Drop for RequestSynchronizer<T, E> {
    fn drop(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
#[path = "synchronizer_tests.rs"]
mod synchronizer_tests;
