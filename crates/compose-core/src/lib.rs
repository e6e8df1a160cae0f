//! Editing-surface capability shared by the composing tracker, the CLI and the
//! host binding layer.

pub mod memory;
pub mod settings;
pub mod surface;
pub mod unicode;
