use std::collections::HashMap;
use std::sync::Arc;

use compose_core::surface::{
    CommandData, CompletionInfo, CorrectionInfo, CursorUpdateMode, EditingSurface, EditorAction,
    ExtractedText, ExtractedTextRequest, InputContentInfo, KeyEvent,
};

use super::types::{
    to_ffi, to_host_data, HostCompletion, HostContent, HostCorrection, HostEditorAction,
    HostExtractedText, HostExtractedTextRequest, HostKeyEvent,
};

/// Editing surface implemented by the host application (Kotlin/Swift).
///
/// Offsets are in the configured offset unit. Every method returns the
/// host's own result; `false`/`None` means the editor refused or is gone.
#[uniffi::export(with_foreign)]
pub trait HostSurface: Send + Sync {
    fn begin_batch_edit(&self) -> bool;
    fn end_batch_edit(&self) -> bool;
    fn clear_meta_key_states(&self, states: u32) -> bool;
    fn commit_completion(&self, completion: HostCompletion) -> bool;
    fn commit_correction(&self, correction: HostCorrection) -> bool;
    fn commit_text(&self, text: String, new_cursor_position: i32) -> bool;
    fn delete_surrounding_text(&self, before_length: u32, after_length: u32) -> bool;
    fn delete_surrounding_text_in_code_points(&self, before_length: u32, after_length: u32)
        -> bool;
    fn finish_composing_text(&self) -> bool;
    fn get_cursor_caps_mode(&self, req_modes: u32) -> u32;
    fn get_extracted_text(
        &self,
        request: HostExtractedTextRequest,
        flags: u32,
    ) -> Option<HostExtractedText>;
    fn get_selected_text(&self, flags: u32) -> Option<String>;
    fn get_text_after_cursor(&self, n: u32, flags: u32) -> Option<String>;
    fn get_text_before_cursor(&self, n: u32, flags: u32) -> Option<String>;
    fn perform_context_menu_action(&self, id: u32) -> bool;
    fn perform_editor_action(&self, action: HostEditorAction) -> bool;
    fn perform_private_command(&self, action: String, data: HashMap<String, String>) -> bool;
    fn report_fullscreen_mode(&self, enabled: bool) -> bool;
    fn send_key_event(&self, event: HostKeyEvent) -> bool;
    fn set_composing_region(&self, start: u32, end: u32) -> bool;
    fn set_composing_text(&self, text: Option<String>, new_cursor_position: i32) -> bool;
    fn set_selection(&self, start: u32, end: u32) -> bool;
    fn request_cursor_updates(&self, mode: u32) -> bool;
    fn close_connection(&self);
    fn commit_content(
        &self,
        content: HostContent,
        flags: u32,
        opts: Option<HashMap<String, String>>,
    ) -> bool;
}

/// Presents a foreign [`HostSurface`] as an [`EditingSurface`].
pub(crate) struct HostSurfaceAdapter {
    host: Arc<dyn HostSurface>,
}

impl HostSurfaceAdapter {
    pub(crate) fn new(host: Arc<dyn HostSurface>) -> Self {
        Self { host }
    }

    /// Whether this adapter wraps exactly `host`.
    pub(crate) fn wraps(&self, host: &Arc<dyn HostSurface>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.host), Arc::as_ptr(host))
    }
}

impl EditingSurface for HostSurfaceAdapter {
    fn begin_batch_edit(&mut self) -> bool {
        self.host.begin_batch_edit()
    }

    fn end_batch_edit(&mut self) -> bool {
        self.host.end_batch_edit()
    }

    fn clear_meta_key_states(&mut self, states: u32) -> bool {
        self.host.clear_meta_key_states(states)
    }

    fn commit_completion(&mut self, completion: &CompletionInfo) -> bool {
        self.host.commit_completion(completion.into())
    }

    fn commit_correction(&mut self, correction: &CorrectionInfo) -> bool {
        self.host.commit_correction(correction.into())
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        self.host.commit_text(text.to_string(), new_cursor_position)
    }

    fn delete_surrounding_text(&mut self, before_length: usize, after_length: usize) -> bool {
        self.host
            .delete_surrounding_text(to_ffi(before_length), to_ffi(after_length))
    }

    fn delete_surrounding_text_in_code_points(
        &mut self,
        before_length: usize,
        after_length: usize,
    ) -> bool {
        self.host
            .delete_surrounding_text_in_code_points(to_ffi(before_length), to_ffi(after_length))
    }

    fn finish_composing_text(&mut self) -> bool {
        self.host.finish_composing_text()
    }

    fn get_cursor_caps_mode(&mut self, req_modes: u32) -> u32 {
        self.host.get_cursor_caps_mode(req_modes)
    }

    fn get_extracted_text(
        &mut self,
        request: &ExtractedTextRequest,
        flags: u32,
    ) -> Option<ExtractedText> {
        self.host
            .get_extracted_text(request.into(), flags)
            .map(ExtractedText::from)
    }

    fn get_selected_text(&mut self, flags: u32) -> Option<String> {
        self.host.get_selected_text(flags)
    }

    fn get_text_after_cursor(&mut self, n: usize, flags: u32) -> Option<String> {
        self.host.get_text_after_cursor(to_ffi(n), flags)
    }

    fn get_text_before_cursor(&mut self, n: usize, flags: u32) -> Option<String> {
        self.host.get_text_before_cursor(to_ffi(n), flags)
    }

    fn perform_context_menu_action(&mut self, id: u32) -> bool {
        self.host.perform_context_menu_action(id)
    }

    fn perform_editor_action(&mut self, action: EditorAction) -> bool {
        self.host.perform_editor_action(action.into())
    }

    fn perform_private_command(&mut self, action: &str, data: &CommandData) -> bool {
        self.host
            .perform_private_command(action.to_string(), to_host_data(data))
    }

    fn report_fullscreen_mode(&mut self, enabled: bool) -> bool {
        self.host.report_fullscreen_mode(enabled)
    }

    fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        self.host.send_key_event(event.into())
    }

    fn set_composing_region(&mut self, start: usize, end: usize) -> bool {
        self.host.set_composing_region(to_ffi(start), to_ffi(end))
    }

    fn set_composing_text(&mut self, text: Option<&str>, new_cursor_position: i32) -> bool {
        self.host
            .set_composing_text(text.map(str::to_string), new_cursor_position)
    }

    fn set_selection(&mut self, start: usize, end: usize) -> bool {
        self.host.set_selection(to_ffi(start), to_ffi(end))
    }

    fn request_cursor_updates(&mut self, mode: CursorUpdateMode) -> bool {
        self.host.request_cursor_updates(mode.bits())
    }

    fn close_connection(&mut self) {
        self.host.close_connection()
    }

    fn commit_content(
        &mut self,
        content: &InputContentInfo,
        flags: u32,
        opts: Option<&CommandData>,
    ) -> bool {
        self.host
            .commit_content(content.into(), flags, opts.map(to_host_data))
    }
}
