//! Every operation that does not affect the composition must reach the host
//! exactly once, in order, and hand back the host's answer.

use compose_core::surface::{
    CommandData, CompletionInfo, CorrectionInfo, CursorUpdateMode, EditingSurface, EditorAction,
    ExtractedTextRequest, InputContentInfo, KeyEvent,
};
use compose_core::unicode::OffsetUnit;

use super::RecordingSurface;
use crate::ComposingTextTracker;

/// Call every pass-through operation once; returns the boolean results.
fn call_all(tracker: &mut ComposingTextTracker) -> Vec<bool> {
    let data = CommandData::new();
    vec![
        tracker.begin_batch_edit(),
        tracker.end_batch_edit(),
        tracker.clear_meta_key_states(1),
        tracker.commit_completion(&CompletionInfo::default()),
        tracker.commit_correction(&CorrectionInfo::default()),
        tracker.commit_text("x", 1),
        tracker.delete_surrounding_text(1, 1),
        tracker.get_cursor_caps_mode(0x4000) != 0,
        tracker
            .get_extracted_text(&ExtractedTextRequest::default(), 0)
            .is_some(),
        tracker.get_selected_text(0).is_some(),
        tracker.get_text_after_cursor(1, 0).is_some(),
        tracker.get_text_before_cursor(1, 0).is_some(),
        tracker.perform_context_menu_action(0),
        tracker.perform_editor_action(EditorAction::Done),
        tracker.perform_private_command("cmd", &data),
        tracker.report_fullscreen_mode(true),
        tracker.send_key_event(&KeyEvent::down(KeyEvent::KEYCODE_DEL)),
        tracker.set_selection(0, 0),
        tracker.request_cursor_updates(CursorUpdateMode::IMMEDIATE),
        tracker.commit_content(&InputContentInfo::default(), 0, Some(&data)),
    ]
}

const EXPECTED_CALLS: [&str; 20] = [
    "begin_batch_edit",
    "end_batch_edit",
    "clear_meta_key_states",
    "commit_completion",
    "commit_correction",
    "commit_text",
    "delete_surrounding_text",
    "get_cursor_caps_mode",
    "get_extracted_text",
    "get_selected_text",
    "get_text_after_cursor",
    "get_text_before_cursor",
    "perform_context_menu_action",
    "perform_editor_action",
    "perform_private_command",
    "report_fullscreen_mode",
    "send_key_event",
    "set_selection",
    "request_cursor_updates",
    "commit_content",
];

#[test]
fn test_passthrough_forwards_in_order() {
    let (surface, log) = RecordingSurface::new(true);
    let mut tracker = ComposingTextTracker::with_unit(Box::new(surface), OffsetUnit::Char);
    let results = call_all(&mut tracker);
    assert!(results.iter().all(|r| *r));
    assert_eq!(log.calls(), EXPECTED_CALLS.to_vec());
}

#[test]
fn test_passthrough_surfaces_host_failure() {
    let (surface, log) = RecordingSurface::new(false);
    let mut tracker = ComposingTextTracker::with_unit(Box::new(surface), OffsetUnit::Char);
    let results = call_all(&mut tracker);
    assert!(results.iter().all(|r| !*r));
    assert_eq!(log.calls().len(), EXPECTED_CALLS.len());
}

#[test]
fn test_passthrough_does_not_touch_shadow() {
    let (surface, _log) = RecordingSurface::new(true);
    let mut tracker = ComposingTextTracker::with_unit(Box::new(surface), OffsetUnit::Char);
    tracker.set_composing_text(Some("きょう"), 1);
    tracker.move_insert_position_left();
    call_all(&mut tracker);
    assert_eq!(tracker.composing_text(), "きょう");
    assert_eq!(tracker.insert_position(), 2);
}

#[test]
fn test_close_connection_forwarded() {
    let (surface, log) = RecordingSurface::new(true);
    let mut tracker = ComposingTextTracker::with_unit(Box::new(surface), OffsetUnit::Char);
    tracker.close_connection();
    assert_eq!(log.calls(), vec!["close_connection"]);
}

#[test]
fn test_query_values_pass_unchanged() {
    let (surface, _log) = RecordingSurface::new(true);
    let mut tracker = ComposingTextTracker::with_unit(Box::new(surface), OffsetUnit::Char);
    assert_eq!(tracker.get_cursor_caps_mode(0x6000), 0x6000);
    assert_eq!(tracker.get_selected_text(0).as_deref(), Some("selected"));
    assert_eq!(tracker.get_text_after_cursor(3, 0).as_deref(), Some("after"));
    assert_eq!(tracker.get_text_before_cursor(3, 0).as_deref(), Some("before"));
}
