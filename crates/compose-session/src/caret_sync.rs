//! Caret placement for hosts that do not report cursor updates.
//!
//! Without cursor updates the host caret ends up at the end of the composing
//! text after every `set_composing_text`, so an insertion in the middle of the
//! composition has to put the host selection back where the user was editing.

use compose_core::settings::settings;
use compose_core::surface::{EditingSurface, ExtractedTextRequest};
use tracing::debug_span;

use super::ComposingTextTracker;

impl ComposingTextTracker {
    /// Re-set the composing text to `text` and move both the host caret and
    /// the insert position to `position` inside it.
    ///
    /// Returns `true` when the host selection was placed. When the host has no
    /// extracted text, or the composition cannot be found in it, the host
    /// selection is left alone but the insert position is still updated.
    pub fn place_caret(&mut self, text: &str, position: usize) -> bool {
        let _span = debug_span!("place_caret", text, position).entered();
        self.begin_batch_edit();
        self.set_composing_text(Some(text), 1);

        let request = ExtractedTextRequest {
            hint_max_chars: settings().caret_sync.extract_max_chars,
            ..ExtractedTextRequest::default()
        };
        let caret = match self.get_extracted_text(&request, 0) {
            Some(extracted) if !text.is_empty() => self
                .unit()
                .find(&extracted.text, text)
                .map(|start| extracted.start_offset + start + position),
            _ => None,
        };
        let placed = match caret {
            Some(caret) => self.set_selection(caret, caret),
            None => {
                tracing::debug!(text, position, "composing span not found in host text");
                false
            }
        };

        self.end_batch_edit();
        self.set_insert_position(position);
        placed
    }
}
