use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::types::Frame;

/// Single-slot holder of the most recently published frame.
///
/// `publish` swaps in a new immutable [`Frame`]; `snapshot` clones the
/// reference to whichever frame is current. The lock is held only for the
/// pointer swap or clone, never while bytes are written or sent, so readers
/// always observe one complete frame.
///
/// Cloning the store yields another handle to the same slot.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    inner: Arc<RwLock<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Frame>,
    published: u64,
}

impl FrameStore {
    /// Create an empty store. Snapshots return `None` until the first publish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame. Returns the sequence number assigned to it.
    pub fn publish(&self, frame: Frame) -> u64 {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        slot.published += 1;
        let sequence = slot.published;
        let bytes = frame.len();
        slot.current = Some(frame.with_sequence(sequence));
        drop(slot);

        debug!(
            event = "core.frame.published",
            sequence = sequence,
            bytes = bytes
        );
        sequence
    }

    /// The current frame, or `None` if nothing has been published yet.
    pub fn snapshot(&self) -> Option<Frame> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Number of frames published since the store was created.
    pub fn published_count(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .published
    }
}
