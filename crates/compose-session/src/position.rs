use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Writer side of the insert position, owned by the tracker.
///
/// Only the tracker writes; readers on other threads go through
/// [`InsertPositionReader`] and never observe a partial update.
#[derive(Debug, Default)]
pub(crate) struct InsertPosition(Arc<AtomicUsize>);

impl InsertPosition {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn store(&self, position: usize) {
        self.0.store(position, Ordering::Release);
    }

    pub(crate) fn reader(&self) -> InsertPositionReader {
        InsertPositionReader(Arc::clone(&self.0))
    }
}

/// Read-only view of a tracker's insert position, safe to use from a
/// rendering thread while the input thread keeps editing.
#[derive(Debug, Clone)]
pub struct InsertPositionReader(Arc<AtomicUsize>);

impl InsertPositionReader {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}
