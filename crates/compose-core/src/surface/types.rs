use std::collections::BTreeMap;

/// Free-form key/value payload for private commands and content commits.
pub type CommandData = BTreeMap<String, String>;

/// A completion the editor offered and the input method accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionInfo {
    pub id: u64,
    pub position: usize,
    pub text: String,
    pub label: Option<String>,
}

/// Auto-correction of text already committed: `old_text` at `offset` becomes `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorrectionInfo {
    pub offset: usize,
    pub old_text: String,
    pub new_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractedTextRequest {
    pub token: u32,
    pub flags: u32,
    pub hint_max_lines: u32,
    pub hint_max_chars: u32,
}

/// Snapshot of the editor content around the caret.
///
/// Selection offsets are relative to `start_offset`, i.e. the absolute caret is
/// `start_offset + selection_start`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText {
    pub text: String,
    pub start_offset: usize,
    pub selection_start: usize,
    pub selection_end: usize,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key_code: u32,
    pub meta_state: u32,
}

impl KeyEvent {
    pub const KEYCODE_DPAD_LEFT: u32 = 21;
    pub const KEYCODE_DPAD_RIGHT: u32 = 22;
    pub const KEYCODE_DEL: u32 = 67;

    pub fn down(key_code: u32) -> Self {
        Self {
            action: KeyAction::Down,
            key_code,
            meta_state: 0,
        }
    }

    pub fn up(key_code: u32) -> Self {
        Self {
            action: KeyAction::Up,
            key_code,
            meta_state: 0,
        }
    }
}

/// Action requested by the editor's enter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorAction {
    #[default]
    Unspecified,
    None,
    Go,
    Search,
    Send,
    Next,
    Done,
    Previous,
}

bitflags::bitflags! {
    /// Flags for `request_cursor_updates`. The empty set requests nothing.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct CursorUpdateMode: u32 {
        /// Report the current cursor position once.
        const IMMEDIATE = 1;
        /// Keep reporting on every cursor change.
        const MONITOR = 2;
    }
}

/// Rich content (image, GIF, ...) handed to the editor by URI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputContentInfo {
    pub content_uri: String,
    pub mime_types: Vec<String>,
    pub link_uri: Option<String>,
}

/// Cursor caps-mode bits returned by `get_cursor_caps_mode`.
pub mod caps {
    pub const CHARACTERS: u32 = 0x1000;
    pub const WORDS: u32 = 0x2000;
    pub const SENTENCES: u32 = 0x4000;
}

/// Context-menu ids understood by `perform_context_menu_action`.
pub mod menu {
    pub const SELECT_ALL: u32 = 0x0102_001f;
    pub const CUT: u32 = 0x0102_0020;
    pub const COPY: u32 = 0x0102_0021;
    pub const PASTE: u32 = 0x0102_0022;
}
