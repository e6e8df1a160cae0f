//! In-memory editing surface that behaves like a single-line host text field.
//!
//! Used by the CLI replayer and by tests that need a surface whose observable
//! state (text, selection, composing region) can be checked after each call.

use crate::settings::settings;
use crate::surface::{
    caps, menu, resolve_new_cursor, CommandData, CompletionInfo, CorrectionInfo,
    CursorUpdateMode, EditingSurface, EditorAction, ExtractedText, ExtractedTextRequest,
    InputContentInfo, KeyAction, KeyEvent,
};
use crate::unicode::OffsetUnit;

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    unit: OffsetUnit,
    /// Anchor and caret; may be reversed.
    selection: (usize, usize),
    composing: Option<(usize, usize)>,
    max_length: Option<usize>,
    batch_depth: u32,
    meta_state: u32,
    fullscreen: bool,
    closed: bool,
    clipboard: Option<String>,
    cursor_updates: CursorUpdateMode,
    last_editor_action: Option<EditorAction>,
    private_commands: Vec<(String, CommandData)>,
    contents: Vec<InputContentInfo>,
}

impl TextBuffer {
    /// Empty buffer using the configured offset unit and length limit.
    pub fn new() -> Self {
        let s = settings();
        Self {
            unit: s.tracker.offset_unit,
            max_length: s.buffer.limit(),
            ..Self::default()
        }
    }

    pub fn with_unit(unit: OffsetUnit) -> Self {
        Self {
            unit,
            ..Self::new()
        }
    }

    /// Buffer pre-filled with `text`, caret at the end.
    pub fn with_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.text = text.to_string();
        let end = buf.len();
        buf.selection = (end, end);
        buf
    }

    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn unit(&self) -> OffsetUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.unit.len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Ordered selection `(start, end)`.
    pub fn selection(&self) -> (usize, usize) {
        ordered(self.selection)
    }

    pub fn composing_region(&self) -> Option<(usize, usize)> {
        self.composing
    }

    pub fn composing_str(&self) -> Option<&str> {
        self.composing
            .map(|(start, end)| self.unit.slice(&self.text, start, end))
    }

    pub fn batch_depth(&self) -> u32 {
        self.batch_depth
    }

    pub fn meta_state(&self) -> u32 {
        self.meta_state
    }

    pub fn set_meta_state(&mut self, meta_state: u32) {
        self.meta_state = meta_state;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn cursor_updates(&self) -> CursorUpdateMode {
        self.cursor_updates
    }

    pub fn last_editor_action(&self) -> Option<EditorAction> {
        self.last_editor_action
    }

    pub fn private_commands(&self) -> &[(String, CommandData)] {
        &self.private_commands
    }

    pub fn contents(&self) -> &[InputContentInfo] {
        &self.contents
    }

    /// Replace `[start, end)` with `text`. Returns the inserted length, or
    /// `None` when the result would exceed the length limit.
    fn replace(&mut self, start: usize, end: usize, text: &str) -> Option<usize> {
        let inserted = self.unit.len(text);
        let removed = end - start;
        if let Some(max) = self.max_length {
            if self.len() - removed + inserted > max {
                tracing::debug!(max, inserted, "text buffer full");
                return None;
            }
        }
        let b0 = self.unit.byte_index(&self.text, start);
        let b1 = self.unit.byte_index(&self.text, end);
        self.text.replace_range(b0..b1, text);
        Some(inserted)
    }

    /// Range the next insertion replaces: the composing region, else the selection.
    fn target_range(&self) -> (usize, usize) {
        self.composing.unwrap_or_else(|| self.selection())
    }

    /// Delete `[start, end)` and shift selection / composing offsets behind it.
    fn remove(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let width = end - start;
        let shift = |pos: usize| {
            if pos >= end {
                pos - width
            } else if pos > start {
                start
            } else {
                pos
            }
        };
        let b0 = self.unit.byte_index(&self.text, start);
        let b1 = self.unit.byte_index(&self.text, end);
        self.text.replace_range(b0..b1, "");
        self.selection = (shift(self.selection.0), shift(self.selection.1));
        self.composing = self
            .composing
            .map(|(s, e)| (shift(s), shift(e)))
            .filter(|(s, e)| s < e);
    }

    fn delete_around(&mut self, before: (usize, usize), after: (usize, usize)) {
        // After first so the `before` offsets stay valid.
        self.remove(after.0, after.1);
        self.remove(before.0, before.1);
    }

    fn move_caret(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        self.selection = (pos, pos);
    }
}

fn ordered((a, b): (usize, usize)) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl EditingSurface for TextBuffer {
    fn begin_batch_edit(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.batch_depth += 1;
        true
    }

    fn end_batch_edit(&mut self) -> bool {
        if self.closed || self.batch_depth == 0 {
            return false;
        }
        self.batch_depth -= 1;
        self.batch_depth > 0
    }

    fn clear_meta_key_states(&mut self, states: u32) -> bool {
        if self.closed {
            return false;
        }
        self.meta_state &= !states;
        true
    }

    fn commit_completion(&mut self, completion: &CompletionInfo) -> bool {
        self.commit_text(&completion.text, 1)
    }

    fn commit_correction(&mut self, correction: &CorrectionInfo) -> bool {
        if self.closed {
            return false;
        }
        let end = correction.offset + self.unit.len(&correction.old_text);
        if self.unit.slice(&self.text, correction.offset, end) != correction.old_text {
            return false;
        }
        let old_len = end - correction.offset;
        match self.replace(correction.offset, end, &correction.new_text) {
            Some(new_len) => {
                let caret = self.selection().1;
                if caret >= end {
                    self.move_caret(caret + new_len - old_len);
                }
                true
            }
            None => false,
        }
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        if self.closed {
            return false;
        }
        let (start, end) = self.target_range();
        let Some(inserted) = self.replace(start, end, text) else {
            return false;
        };
        self.composing = None;
        let caret = resolve_new_cursor(start, inserted, new_cursor_position, self.len());
        self.move_caret(caret);
        tracing::debug!(text, caret, "commit_text");
        true
    }

    fn delete_surrounding_text(&mut self, before_length: usize, after_length: usize) -> bool {
        if self.closed {
            return false;
        }
        let (start, end) = self.selection();
        let after_end = (end + after_length).min(self.len());
        self.delete_around(
            (start.saturating_sub(before_length), start),
            (end, after_end),
        );
        true
    }

    fn delete_surrounding_text_in_code_points(
        &mut self,
        before_length: usize,
        after_length: usize,
    ) -> bool {
        if self.closed {
            return false;
        }
        let (start, end) = self.selection();
        let bs = self.unit.byte_index(&self.text, start);
        let be = self.unit.byte_index(&self.text, end);
        let cut_start = if before_length == 0 {
            bs
        } else {
            self.text[..bs]
                .char_indices()
                .rev()
                .take(before_length)
                .last()
                .map_or(bs, |(i, _)| i)
        };
        let cut_end = self.text[be..]
            .char_indices()
            .nth(after_length)
            .map_or(self.text.len(), |(i, _)| be + i);
        let before = (self.unit.offset_of_byte(&self.text, cut_start), start);
        let after = (end, self.unit.offset_of_byte(&self.text, cut_end));
        self.delete_around(before, after);
        true
    }

    fn finish_composing_text(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.composing = None;
        true
    }

    fn get_cursor_caps_mode(&mut self, req_modes: u32) -> u32 {
        if self.closed {
            return 0;
        }
        let caret = self.selection().0;
        let before = self.unit.slice(&self.text, 0, caret);
        let trimmed = before.trim_end();
        let sentence_start = trimmed.is_empty() || trimmed.ends_with(['.', '!', '?', '。']);
        let at_word_start = trimmed.len() < before.len() || trimmed.is_empty();
        let mut modes = 0;
        if at_word_start {
            modes |= caps::WORDS;
            if sentence_start {
                modes |= caps::SENTENCES;
            }
        }
        modes & req_modes
    }

    fn get_extracted_text(
        &mut self,
        request: &ExtractedTextRequest,
        _flags: u32,
    ) -> Option<ExtractedText> {
        if self.closed {
            return None;
        }
        let (selection_start, selection_end) = self.selection();
        let window = request.hint_max_chars as usize;
        let (start, end) = if window > 0 && self.len() > window {
            // Keep a window that still contains the caret.
            let start = selection_end.saturating_sub(window / 2);
            let end = (start + window).min(self.len());
            (end.saturating_sub(window), end)
        } else {
            (0, self.len())
        };
        Some(ExtractedText {
            text: self.unit.slice(&self.text, start, end).to_string(),
            start_offset: start,
            selection_start: selection_start.saturating_sub(start),
            selection_end: selection_end - start,
            flags: 0,
        })
    }

    fn get_selected_text(&mut self, _flags: u32) -> Option<String> {
        let (start, end) = self.selection();
        if self.closed || start == end {
            return None;
        }
        Some(self.unit.slice(&self.text, start, end).to_string())
    }

    fn get_text_after_cursor(&mut self, n: usize, _flags: u32) -> Option<String> {
        if self.closed {
            return None;
        }
        let end = self.selection().1;
        Some(self.unit.slice(&self.text, end, end + n).to_string())
    }

    fn get_text_before_cursor(&mut self, n: usize, _flags: u32) -> Option<String> {
        if self.closed {
            return None;
        }
        let start = self.selection().0;
        Some(
            self.unit
                .slice(&self.text, start.saturating_sub(n), start)
                .to_string(),
        )
    }

    fn perform_context_menu_action(&mut self, id: u32) -> bool {
        if self.closed {
            return false;
        }
        let (start, end) = self.selection();
        match id {
            menu::SELECT_ALL => {
                self.selection = (0, self.len());
                true
            }
            menu::COPY | menu::CUT if start < end => {
                self.clipboard = Some(self.unit.slice(&self.text, start, end).to_string());
                if id == menu::CUT {
                    self.remove(start, end);
                }
                true
            }
            menu::PASTE => match self.clipboard.clone() {
                Some(clip) => self.commit_text(&clip, 1),
                None => false,
            },
            _ => false,
        }
    }

    fn perform_editor_action(&mut self, action: EditorAction) -> bool {
        if self.closed {
            return false;
        }
        self.last_editor_action = Some(action);
        true
    }

    fn perform_private_command(&mut self, action: &str, data: &CommandData) -> bool {
        if self.closed {
            return false;
        }
        self.private_commands
            .push((action.to_string(), data.clone()));
        true
    }

    fn report_fullscreen_mode(&mut self, enabled: bool) -> bool {
        if self.closed {
            return false;
        }
        self.fullscreen = enabled;
        true
    }

    fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        if self.closed {
            return false;
        }
        if event.action == KeyAction::Up {
            return true;
        }
        let (start, end) = self.selection();
        match event.key_code {
            KeyEvent::KEYCODE_DEL => {
                if start < end {
                    self.remove(start, end);
                } else if start > 0 {
                    // One character, not one unit, so surrogate pairs go together.
                    let bs = self.unit.byte_index(&self.text, start);
                    let prev = self.text[..bs]
                        .char_indices()
                        .next_back()
                        .map_or(0, |(i, _)| i);
                    let prev = self.unit.offset_of_byte(&self.text, prev);
                    self.remove(prev, start);
                }
                self.composing = None;
                true
            }
            KeyEvent::KEYCODE_DPAD_LEFT => {
                self.move_caret(start.saturating_sub(1));
                true
            }
            KeyEvent::KEYCODE_DPAD_RIGHT => {
                self.move_caret(end + 1);
                true
            }
            _ => false,
        }
    }

    fn set_composing_region(&mut self, start: usize, end: usize) -> bool {
        if self.closed {
            return false;
        }
        let len = self.len();
        let (start, end) = ordered((start.min(len), end.min(len)));
        self.composing = (start < end).then_some((start, end));
        true
    }

    fn set_composing_text(&mut self, text: Option<&str>, new_cursor_position: i32) -> bool {
        if self.closed {
            return false;
        }
        let text = text.unwrap_or("");
        let (start, end) = self.target_range();
        let Some(inserted) = self.replace(start, end, text) else {
            return false;
        };
        self.composing = (inserted > 0).then_some((start, start + inserted));
        let caret = resolve_new_cursor(start, inserted, new_cursor_position, self.len());
        self.move_caret(caret);
        tracing::debug!(text, caret, "set_composing_text");
        true
    }

    fn set_selection(&mut self, start: usize, end: usize) -> bool {
        let len = self.len();
        if self.closed || start > len || end > len {
            return false;
        }
        self.selection = (start, end);
        true
    }

    fn request_cursor_updates(&mut self, mode: CursorUpdateMode) -> bool {
        if self.closed {
            return false;
        }
        self.cursor_updates = mode;
        true
    }

    fn close_connection(&mut self) {
        self.composing = None;
        self.batch_depth = 0;
        self.closed = true;
    }

    fn commit_content(
        &mut self,
        content: &InputContentInfo,
        _flags: u32,
        _opts: Option<&CommandData>,
    ) -> bool {
        if self.closed {
            return false;
        }
        self.contents.push(content.clone());
        true
    }
}
