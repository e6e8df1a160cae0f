use std::collections::HashMap;

use compose_core::surface::{
    CommandData, CompletionInfo, CorrectionInfo, EditorAction, ExtractedText,
    ExtractedTextRequest, InputContentInfo, KeyAction, KeyEvent,
};
use compose_session::TrackerError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ComposeError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
    #[error("no surface attached: {msg}")]
    NotAttached { msg: String },
}

impl From<TrackerError> for ComposeError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::InvalidArgument(_) => ComposeError::NotAttached { msg: e.to_string() },
            TrackerError::OutOfRange { .. } => ComposeError::InvalidData { msg: e.to_string() },
        }
    }
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, uniffi::Record)]
pub struct HostCompletion {
    pub id: u64,
    pub position: u32,
    pub text: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct HostCorrection {
    pub offset: u32,
    pub old_text: String,
    pub new_text: String,
}

#[derive(Debug, Clone, Copy, uniffi::Record)]
pub struct HostExtractedTextRequest {
    pub token: u32,
    pub flags: u32,
    pub hint_max_lines: u32,
    pub hint_max_chars: u32,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct HostExtractedText {
    pub text: String,
    pub start_offset: u32,
    pub selection_start: u32,
    pub selection_end: u32,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, uniffi::Record)]
pub struct HostKeyEvent {
    pub down: bool,
    pub key_code: u32,
    pub meta_state: u32,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct HostContent {
    pub content_uri: String,
    pub mime_types: Vec<String>,
    pub link_uri: Option<String>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum HostEditorAction {
    Unspecified,
    None,
    Go,
    Search,
    Send,
    Next,
    Done,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum HostComposeState {
    Empty,
    Composing,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Offsets past `u32::MAX` saturate; no real editor gets there.
pub(crate) fn to_ffi(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl From<&CompletionInfo> for HostCompletion {
    fn from(c: &CompletionInfo) -> Self {
        Self {
            id: c.id,
            position: to_ffi(c.position),
            text: c.text.clone(),
            label: c.label.clone(),
        }
    }
}

impl From<&CorrectionInfo> for HostCorrection {
    fn from(c: &CorrectionInfo) -> Self {
        Self {
            offset: to_ffi(c.offset),
            old_text: c.old_text.clone(),
            new_text: c.new_text.clone(),
        }
    }
}

impl From<&ExtractedTextRequest> for HostExtractedTextRequest {
    fn from(r: &ExtractedTextRequest) -> Self {
        Self {
            token: r.token,
            flags: r.flags,
            hint_max_lines: r.hint_max_lines,
            hint_max_chars: r.hint_max_chars,
        }
    }
}

impl From<HostExtractedText> for ExtractedText {
    fn from(e: HostExtractedText) -> Self {
        Self {
            text: e.text,
            start_offset: e.start_offset as usize,
            selection_start: e.selection_start as usize,
            selection_end: e.selection_end as usize,
            flags: e.flags,
        }
    }
}

impl From<&KeyEvent> for HostKeyEvent {
    fn from(e: &KeyEvent) -> Self {
        Self {
            down: e.action == KeyAction::Down,
            key_code: e.key_code,
            meta_state: e.meta_state,
        }
    }
}

impl From<&InputContentInfo> for HostContent {
    fn from(c: &InputContentInfo) -> Self {
        Self {
            content_uri: c.content_uri.clone(),
            mime_types: c.mime_types.clone(),
            link_uri: c.link_uri.clone(),
        }
    }
}

impl From<EditorAction> for HostEditorAction {
    fn from(a: EditorAction) -> Self {
        match a {
            EditorAction::Unspecified => Self::Unspecified,
            EditorAction::None => Self::None,
            EditorAction::Go => Self::Go,
            EditorAction::Search => Self::Search,
            EditorAction::Send => Self::Send,
            EditorAction::Next => Self::Next,
            EditorAction::Done => Self::Done,
            EditorAction::Previous => Self::Previous,
        }
    }
}

pub(crate) fn to_host_data(data: &CommandData) -> HashMap<String, String> {
    data.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}
