use compose_core::settings::settings;
use compose_core::surface::{
    CommandData, CompletionInfo, CorrectionInfo, CursorUpdateMode, EditingSurface, EditorAction,
    ExtractedText, ExtractedTextRequest, InputContentInfo, KeyEvent,
};
use compose_core::unicode::OffsetUnit;

use super::error::TrackerError;
use super::position::{InsertPosition, InsertPositionReader};
use super::types::ComposeState;

/// Drop-in `EditingSurface` that tracks the active composition.
///
/// Invariant: `0 <= insert_position <= len(composing_text)`, except right
/// after an out-of-range [`set_insert_position`](Self::set_insert_position),
/// until the next `set_composing_text` / `finish_composing_text` / `reset`.
pub struct ComposingTextTracker {
    base: Box<dyn EditingSurface>,
    composing_text: String,
    insert_position: InsertPosition,
    unit: OffsetUnit,
}

impl ComposingTextTracker {
    /// Wrap `base`, measuring offsets in the configured unit.
    pub fn new(base: Box<dyn EditingSurface>) -> Self {
        Self::with_unit(base, settings().tracker.offset_unit)
    }

    pub fn with_unit(base: Box<dyn EditingSurface>, unit: OffsetUnit) -> Self {
        Self {
            base,
            composing_text: String::new(),
            insert_position: InsertPosition::default(),
            unit,
        }
    }

    /// Like [`new`](Self::new), for callers holding a possibly absent handle.
    pub fn try_new(base: Option<Box<dyn EditingSurface>>) -> Result<Self, TrackerError> {
        base.map(Self::new)
            .ok_or(TrackerError::InvalidArgument("base surface is required"))
    }

    /// Returns `None` for an absent handle, the handle itself if it already is
    /// a tracker, and a new tracker around it otherwise.
    pub fn wrap_or_reuse(base: Option<Box<dyn EditingSurface>>) -> Option<Box<Self>> {
        let base = base?;
        if (*base).as_any().is::<Self>() {
            return base.into_any().downcast::<Self>().ok();
        }
        Some(Box::new(Self::new(base)))
    }

    /// Attach to the surface of a newly focused editor: wrap (or reuse), ask
    /// the host for cursor updates and drop any stale composition.
    pub fn start_input(
        base: Option<Box<dyn EditingSurface>>,
        cursor_updates: CursorUpdateMode,
    ) -> Option<Box<Self>> {
        let mut tracker = Self::wrap_or_reuse(base)?;
        if !tracker.request_cursor_updates(cursor_updates) {
            tracing::debug!(
                mode = cursor_updates.bits(),
                "host declined cursor updates"
            );
        }
        tracker.reset();
        Some(tracker)
    }

    pub fn composing_text(&self) -> &str {
        &self.composing_text
    }

    pub fn insert_position(&self) -> usize {
        self.insert_position.get()
    }

    /// Handle for reading the insert position from another thread.
    pub fn insert_position_reader(&self) -> InsertPositionReader {
        self.insert_position.reader()
    }

    pub fn state(&self) -> ComposeState {
        if self.composing_text.is_empty() {
            ComposeState::Empty
        } else {
            ComposeState::Composing
        }
    }

    pub fn unit(&self) -> OffsetUnit {
        self.unit
    }

    /// Length of the composing text in offset units.
    pub fn composing_len(&self) -> usize {
        self.unit.len(&self.composing_text)
    }

    pub fn move_insert_position_left(&mut self) {
        let pos = self.insert_position.get();
        self.insert_position.store(pos.saturating_sub(1));
    }

    pub fn move_insert_position_right(&mut self) {
        let pos = self.insert_position.get();
        self.insert_position
            .store(pos.saturating_add(1).min(self.composing_len()));
    }

    /// Overwrite the insert position without any bounds check.
    ///
    /// Escape hatch for callers that already know the host caret, e.g. after
    /// placing the selection themselves. An out-of-range value stays until the
    /// next `set_composing_text`, `finish_composing_text` or `reset`. New call
    /// sites should prefer [`try_set_insert_position`](Self::try_set_insert_position).
    pub fn set_insert_position(&mut self, position: usize) {
        self.insert_position.store(position);
    }

    pub fn try_set_insert_position(&mut self, position: usize) -> Result<(), TrackerError> {
        let len = self.composing_len();
        if position > len {
            return Err(TrackerError::OutOfRange { position, len });
        }
        self.insert_position.store(position);
        Ok(())
    }

    /// Forget the composition without telling the host.
    pub fn reset(&mut self) {
        tracing::debug!(discarded = %self.composing_text, "reset composing text");
        self.composing_text.clear();
        self.insert_position.store(0);
    }

    pub fn base(&self) -> &dyn EditingSurface {
        self.base.as_ref()
    }

    pub fn base_mut(&mut self) -> &mut dyn EditingSurface {
        self.base.as_mut()
    }

    pub fn into_base(self) -> Box<dyn EditingSurface> {
        self.base
    }
}

impl EditingSurface for ComposingTextTracker {
    forward_to_base! {
        fn begin_batch_edit(&mut self) -> bool;
        fn end_batch_edit(&mut self) -> bool;
        fn clear_meta_key_states(&mut self, states: u32) -> bool;
        fn commit_completion(&mut self, completion: &CompletionInfo) -> bool;
        fn commit_correction(&mut self, correction: &CorrectionInfo) -> bool;
        fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool;
        fn delete_surrounding_text(&mut self, before_length: usize, after_length: usize) -> bool;
        fn get_cursor_caps_mode(&mut self, req_modes: u32) -> u32;
        fn get_extracted_text(
            &mut self,
            request: &ExtractedTextRequest,
            flags: u32
        ) -> Option<ExtractedText>;
        fn get_selected_text(&mut self, flags: u32) -> Option<String>;
        fn get_text_after_cursor(&mut self, n: usize, flags: u32) -> Option<String>;
        fn get_text_before_cursor(&mut self, n: usize, flags: u32) -> Option<String>;
        fn perform_context_menu_action(&mut self, id: u32) -> bool;
        fn perform_editor_action(&mut self, action: EditorAction) -> bool;
        fn perform_private_command(&mut self, action: &str, data: &CommandData) -> bool;
        fn report_fullscreen_mode(&mut self, enabled: bool) -> bool;
        fn send_key_event(&mut self, event: &KeyEvent) -> bool;
        fn set_selection(&mut self, start: usize, end: usize) -> bool;
        fn request_cursor_updates(&mut self, mode: CursorUpdateMode) -> bool;
        fn commit_content(
            &mut self,
            content: &InputContentInfo,
            flags: u32,
            opts: Option<&CommandData>
        ) -> bool;
    }

    /// Never forwarded; always `false`.
    fn delete_surrounding_text_in_code_points(
        &mut self,
        before_length: usize,
        after_length: usize,
    ) -> bool {
        tracing::debug!(
            before_length,
            after_length,
            "delete_surrounding_text_in_code_points unsupported"
        );
        false
    }

    fn finish_composing_text(&mut self) -> bool {
        self.composing_text.clear();
        self.insert_position.store(0);
        self.base.finish_composing_text()
    }

    /// Forwarded without touching the shadow state: region changes never
    /// move the tracked insert position.
    fn set_composing_region(&mut self, start: usize, end: usize) -> bool {
        self.base.set_composing_region(start, end)
    }

    /// The insert position snaps to the end of `text` whatever
    /// `new_cursor_position` says.
    fn set_composing_text(&mut self, text: Option<&str>, new_cursor_position: i32) -> bool {
        self.composing_text.clear();
        match text {
            Some(text) => {
                self.composing_text.push_str(text);
                self.insert_position.store(self.unit.len(text));
            }
            None => self.insert_position.store(0),
        }
        tracing::trace!(
            text = %self.composing_text,
            insert_position = self.insert_position.get(),
            "set_composing_text"
        );
        self.base.set_composing_text(text, new_cursor_position)
    }

    fn close_connection(&mut self) {
        self.base.close_connection();
    }
}
