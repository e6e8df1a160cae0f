mod passthrough;

use std::sync::{Arc, Mutex};

use compose_core::surface::{
    CommandData, CompletionInfo, CorrectionInfo, CursorUpdateMode, EditingSurface, EditorAction,
    ExtractedText, ExtractedTextRequest, InputContentInfo, KeyEvent,
};
use compose_core::unicode::OffsetUnit;

use super::ComposingTextTracker;

/// Names of the surface operations that reached the delegate, in call order.
#[derive(Clone, Default)]
pub(super) struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    fn push(&self, op: &'static str) {
        self.0.lock().unwrap().push(op);
    }

    pub(super) fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    pub(super) fn count(&self, op: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|c| **c == op).count()
    }
}

/// Surface that records every call and answers with a fixed result.
pub(super) struct RecordingSurface {
    log: CallLog,
    result: bool,
}

impl RecordingSurface {
    pub(super) fn new(result: bool) -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                log: log.clone(),
                result,
            },
            log,
        )
    }
}

impl EditingSurface for RecordingSurface {
    fn begin_batch_edit(&mut self) -> bool {
        self.log.push("begin_batch_edit");
        self.result
    }
    fn end_batch_edit(&mut self) -> bool {
        self.log.push("end_batch_edit");
        self.result
    }
    fn clear_meta_key_states(&mut self, _states: u32) -> bool {
        self.log.push("clear_meta_key_states");
        self.result
    }
    fn commit_completion(&mut self, _completion: &CompletionInfo) -> bool {
        self.log.push("commit_completion");
        self.result
    }
    fn commit_correction(&mut self, _correction: &CorrectionInfo) -> bool {
        self.log.push("commit_correction");
        self.result
    }
    fn commit_text(&mut self, _text: &str, _new_cursor_position: i32) -> bool {
        self.log.push("commit_text");
        self.result
    }
    fn delete_surrounding_text(&mut self, _before: usize, _after: usize) -> bool {
        self.log.push("delete_surrounding_text");
        self.result
    }
    fn delete_surrounding_text_in_code_points(&mut self, _before: usize, _after: usize) -> bool {
        self.log.push("delete_surrounding_text_in_code_points");
        self.result
    }
    fn finish_composing_text(&mut self) -> bool {
        self.log.push("finish_composing_text");
        self.result
    }
    fn get_cursor_caps_mode(&mut self, req_modes: u32) -> u32 {
        self.log.push("get_cursor_caps_mode");
        if self.result {
            req_modes
        } else {
            0
        }
    }
    fn get_extracted_text(
        &mut self,
        _request: &ExtractedTextRequest,
        _flags: u32,
    ) -> Option<ExtractedText> {
        self.log.push("get_extracted_text");
        self.result.then(ExtractedText::default)
    }
    fn get_selected_text(&mut self, _flags: u32) -> Option<String> {
        self.log.push("get_selected_text");
        self.result.then(|| "selected".to_string())
    }
    fn get_text_after_cursor(&mut self, _n: usize, _flags: u32) -> Option<String> {
        self.log.push("get_text_after_cursor");
        self.result.then(|| "after".to_string())
    }
    fn get_text_before_cursor(&mut self, _n: usize, _flags: u32) -> Option<String> {
        self.log.push("get_text_before_cursor");
        self.result.then(|| "before".to_string())
    }
    fn perform_context_menu_action(&mut self, _id: u32) -> bool {
        self.log.push("perform_context_menu_action");
        self.result
    }
    fn perform_editor_action(&mut self, _action: EditorAction) -> bool {
        self.log.push("perform_editor_action");
        self.result
    }
    fn perform_private_command(&mut self, _action: &str, _data: &CommandData) -> bool {
        self.log.push("perform_private_command");
        self.result
    }
    fn report_fullscreen_mode(&mut self, _enabled: bool) -> bool {
        self.log.push("report_fullscreen_mode");
        self.result
    }
    fn send_key_event(&mut self, _event: &KeyEvent) -> bool {
        self.log.push("send_key_event");
        self.result
    }
    fn set_composing_region(&mut self, _start: usize, _end: usize) -> bool {
        self.log.push("set_composing_region");
        self.result
    }
    fn set_composing_text(&mut self, _text: Option<&str>, _new_cursor_position: i32) -> bool {
        self.log.push("set_composing_text");
        self.result
    }
    fn set_selection(&mut self, _start: usize, _end: usize) -> bool {
        self.log.push("set_selection");
        self.result
    }
    fn request_cursor_updates(&mut self, _mode: CursorUpdateMode) -> bool {
        self.log.push("request_cursor_updates");
        self.result
    }
    fn close_connection(&mut self) {
        self.log.push("close_connection");
    }
    fn commit_content(
        &mut self,
        _content: &InputContentInfo,
        _flags: u32,
        _opts: Option<&CommandData>,
    ) -> bool {
        self.log.push("commit_content");
        self.result
    }
}

/// Tracker over a recording surface that accepts everything.
pub(super) fn make_tracker() -> (ComposingTextTracker, CallLog) {
    let (surface, log) = RecordingSurface::new(true);
    (
        ComposingTextTracker::with_unit(Box::new(surface), OffsetUnit::Char),
        log,
    )
}
