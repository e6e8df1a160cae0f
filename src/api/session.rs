use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use compose_core::settings::settings;
use compose_core::surface::EditingSurface;
use compose_session::{ComposeState, ComposingTextTracker, InsertPositionReader};
use tracing::debug_span;

use super::host::{HostSurface, HostSurfaceAdapter};
use super::types::{to_ffi, ComposeError, HostComposeState};

/// One input method session: the tracker for the currently focused editor.
///
/// `insert_position` only touches the reader, so a UI thread can poll it while
/// another call holds the session lock.
#[derive(uniffi::Object)]
pub struct ComposeSession {
    tracker: Mutex<Option<Box<ComposingTextTracker>>>,
    position: RwLock<Option<InsertPositionReader>>,
}

#[uniffi::export]
impl ComposeSession {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tracker: Mutex::new(None),
            position: RwLock::new(None),
        })
    }

    /// Attach to a newly focused editor. Re-attaching the surface that is
    /// already attached keeps the same tracker.
    fn start_input(&self, surface: Arc<dyn HostSurface>) {
        let _span = debug_span!("start_input").entered();
        let mut slot = self.lock();
        let base: Box<dyn EditingSurface> = match slot.take() {
            Some(current) if attached_to(&current, &surface) => {
                current as Box<dyn EditingSurface>
            }
            _ => Box::new(HostSurfaceAdapter::new(surface)),
        };
        let mode = settings().caret_sync.cursor_update_mode.mode();
        let tracker = ComposingTextTracker::start_input(Some(base), mode);
        self.set_reader(tracker.as_ref().map(|t| t.insert_position_reader()));
        *slot = tracker;
    }

    /// Detach from the editor and drop the tracker.
    fn finish_input(&self) {
        let mut slot = self.lock();
        if slot.take().is_some() {
            tracing::debug!("input finished");
        }
        self.set_reader(None);
    }

    fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    fn set_composing_text(&self, text: Option<String>, new_cursor_position: i32) -> bool {
        self.with_tracker("set_composing_text", false, |t| {
            t.set_composing_text(text.as_deref(), new_cursor_position)
        })
    }

    fn finish_composing_text(&self) -> bool {
        self.with_tracker("finish_composing_text", false, |t| t.finish_composing_text())
    }

    fn set_composing_region(&self, start: u32, end: u32) -> bool {
        self.with_tracker("set_composing_region", false, |t| {
            t.set_composing_region(start as usize, end as usize)
        })
    }

    fn commit_text(&self, text: String, new_cursor_position: i32) -> bool {
        self.with_tracker("commit_text", false, |t| {
            t.commit_text(&text, new_cursor_position)
        })
    }

    /// Re-set the composing text and put the host caret at `position` inside it.
    fn place_caret(&self, text: String, position: u32) -> bool {
        self.with_tracker("place_caret", false, |t| {
            t.place_caret(&text, position as usize)
        })
    }

    fn move_left(&self) {
        self.with_tracker("move_left", (), |t| t.move_insert_position_left())
    }

    fn move_right(&self) {
        self.with_tracker("move_right", (), |t| t.move_insert_position_right())
    }

    /// Unchecked: a position past the end is stored as given.
    fn set_insert_position(&self, position: u32) {
        self.with_tracker("set_insert_position", (), |t| {
            t.set_insert_position(position as usize)
        })
    }

    fn try_set_insert_position(&self, position: u32) -> Result<(), ComposeError> {
        let mut slot = self.lock();
        let tracker = slot.as_mut().ok_or_else(|| ComposeError::NotAttached {
            msg: "try_set_insert_position".to_string(),
        })?;
        tracker.try_set_insert_position(position as usize)?;
        Ok(())
    }

    fn reset(&self) {
        self.with_tracker("reset", (), |t| t.reset())
    }

    fn composing_text(&self) -> String {
        self.with_tracker("composing_text", String::new(), |t| {
            t.composing_text().to_string()
        })
    }

    fn state(&self) -> HostComposeState {
        let state = self.with_tracker("state", ComposeState::Empty, |t| t.state());
        match state {
            ComposeState::Empty => HostComposeState::Empty,
            ComposeState::Composing => HostComposeState::Composing,
        }
    }

    /// Safe to call from any thread, even while another call is in progress.
    fn insert_position(&self) -> u32 {
        self.position
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |r| to_ffi(r.get()))
    }
}

impl ComposeSession {
    fn lock(&self) -> MutexGuard<'_, Option<Box<ComposingTextTracker>>> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_reader(&self, reader: Option<InsertPositionReader>) {
        *self.position.write().unwrap_or_else(PoisonError::into_inner) = reader;
    }

    fn with_tracker<R>(
        &self,
        op: &'static str,
        detached: R,
        f: impl FnOnce(&mut ComposingTextTracker) -> R,
    ) -> R {
        match self.lock().as_deref_mut() {
            Some(tracker) => f(tracker),
            None => {
                tracing::debug!(op, "no surface attached");
                detached
            }
        }
    }
}

fn attached_to(tracker: &ComposingTextTracker, surface: &Arc<dyn HostSurface>) -> bool {
    tracker
        .base()
        .as_any()
        .downcast_ref::<HostSurfaceAdapter>()
        .is_some_and(|adapter| adapter.wraps(surface))
}
