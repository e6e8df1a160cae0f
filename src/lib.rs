//! Composing-text tracking engine for input methods.
//!
//! The tracker itself lives in `compose-session`; this crate binds it to a
//! foreign host through UniFFI.

uniffi::setup_scaffolding!();

pub mod api;
mod trace_init;

pub use compose_core::surface::EditingSurface;
pub use compose_session::{ComposeState, ComposingTextTracker, InsertPositionReader, TrackerError};
