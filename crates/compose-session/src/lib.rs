//! Composing-text tracking decorator.
//!
//! `ComposingTextTracker` stands in for the host `EditingSurface`: every call is
//! forwarded unchanged, and the calls that change what is being composed also
//! update a shadow copy of the composing text and the insert position inside it.
//! Gesture handlers that move the caret during conversion (which never reach
//! the host) adjust the insert position directly.

#[macro_use]
mod forward;

mod caret_sync;
mod error;
mod position;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use error::TrackerError;
pub use position::InsertPositionReader;
pub use tracker::ComposingTextTracker;
pub use types::ComposeState;
