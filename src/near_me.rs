//! Near-me dispatch
//!
//! Queries with "near me" intent are dispatched with the user's location when
//! it can be resolved in time, and without it otherwise.

mod intent;
mod policy;

pub use intent::{NearMeIntent, PhraseNearMeIntent};
pub use policy::{DispatchOutcome, NearMeDispatchPolicy};
