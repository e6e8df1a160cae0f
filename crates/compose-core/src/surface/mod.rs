//! The host editing surface: the capability through which an input method
//! reads and mutates the text of the focused editor.
//!
//! Offsets are in the host's offset unit (see [`crate::unicode::OffsetUnit`]).
//! Every operation reports the host's own result; `false` / `None` means the
//! host refused or the connection is gone.

mod types;
pub use types::*;

use std::any::Any;

/// Downcasting support for boxed surfaces, so a decorator can recognise an
/// already-decorated handle.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

pub trait EditingSurface: AsAny + Send {
    fn begin_batch_edit(&mut self) -> bool;
    fn end_batch_edit(&mut self) -> bool;
    fn clear_meta_key_states(&mut self, states: u32) -> bool;
    fn commit_completion(&mut self, completion: &CompletionInfo) -> bool;
    fn commit_correction(&mut self, correction: &CorrectionInfo) -> bool;
    /// Commit `text`, replacing the composing region (or the selection).
    /// `new_cursor_position > 0` is relative to the end of the inserted text
    /// minus one; `<= 0` is relative to its start.
    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool;
    fn delete_surrounding_text(&mut self, before_length: usize, after_length: usize) -> bool;
    fn delete_surrounding_text_in_code_points(
        &mut self,
        before_length: usize,
        after_length: usize,
    ) -> bool;
    fn finish_composing_text(&mut self) -> bool;
    fn get_cursor_caps_mode(&mut self, req_modes: u32) -> u32;
    fn get_extracted_text(
        &mut self,
        request: &ExtractedTextRequest,
        flags: u32,
    ) -> Option<ExtractedText>;
    fn get_selected_text(&mut self, flags: u32) -> Option<String>;
    fn get_text_after_cursor(&mut self, n: usize, flags: u32) -> Option<String>;
    fn get_text_before_cursor(&mut self, n: usize, flags: u32) -> Option<String>;
    fn perform_context_menu_action(&mut self, id: u32) -> bool;
    fn perform_editor_action(&mut self, action: EditorAction) -> bool;
    fn perform_private_command(&mut self, action: &str, data: &CommandData) -> bool;
    fn report_fullscreen_mode(&mut self, enabled: bool) -> bool;
    fn send_key_event(&mut self, event: &KeyEvent) -> bool;
    fn set_composing_region(&mut self, start: usize, end: usize) -> bool;
    /// Replace the composing region with `text` (`None` clears it).
    /// `new_cursor_position` follows the same convention as `commit_text`.
    fn set_composing_text(&mut self, text: Option<&str>, new_cursor_position: i32) -> bool;
    fn set_selection(&mut self, start: usize, end: usize) -> bool;
    fn request_cursor_updates(&mut self, mode: CursorUpdateMode) -> bool;
    fn close_connection(&mut self);
    fn commit_content(
        &mut self,
        content: &InputContentInfo,
        flags: u32,
        opts: Option<&CommandData>,
    ) -> bool;
}

/// Resolve a `new_cursor_position` argument into an absolute caret offset,
/// given the inserted span `[start, start + inserted_len)` and the total length
/// after insertion.
pub fn resolve_new_cursor(
    start: usize,
    inserted_len: usize,
    new_cursor_position: i32,
    total_len: usize,
) -> usize {
    let anchor = if new_cursor_position > 0 {
        (start + inserted_len) as i64 + i64::from(new_cursor_position) - 1
    } else {
        start as i64 + i64::from(new_cursor_position)
    };
    anchor.clamp(0, total_len as i64) as usize
}
