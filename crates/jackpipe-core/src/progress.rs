//! Lock-free view of the transfer cursors for the main thread.

use crate::lockfree::AtomicCursor;

/// Cursor positions published by the [`TransferEngine`](crate::TransferEngine).
///
/// The engine is the only writer. The session poll loop and any reporting
/// code read through [`Arc<TransferProgress>`](std::sync::Arc) handles.
#[derive(Debug)]
pub struct TransferProgress {
    played: AtomicCursor,
    captured: AtomicCursor,
    playback_len: usize,
    capture_target: usize,
}

impl TransferProgress {
    pub(crate) fn new(playback_len: usize, capture_target: usize) -> Self {
        Self {
            played: AtomicCursor::default(),
            captured: AtomicCursor::default(),
            playback_len,
            capture_target,
        }
    }

    /// Frames of the playback buffer already handed to the output port.
    pub fn played(&self) -> usize {
        self.played.get()
    }

    /// Frames already copied into the capture buffer.
    pub fn captured(&self) -> usize {
        self.captured.get()
    }

    pub fn playback_len(&self) -> usize {
        self.playback_len
    }

    pub fn capture_target(&self) -> usize {
        self.capture_target
    }

    pub fn is_capture_complete(&self) -> bool {
        self.captured() >= self.capture_target
    }

    pub fn is_playback_complete(&self) -> bool {
        self.played() >= self.playback_len
    }

    #[inline]
    pub(crate) fn publish(&self, played: usize, captured: usize) {
        self.played.publish(played);
        self.captured.publish(captured);
    }
}
