//! Request sequencing
//!
//! Every asynchronous fetch issued through a [`RequestSynchronizer`] is tagged
//! with a sequence number. Only the completion belonging to the most recently
//! issued request is published; earlier ones are discarded on arrival.

mod synchronizer;

pub use synchronizer::{RequestSynchronizer, RequestTicket, Resolution};
