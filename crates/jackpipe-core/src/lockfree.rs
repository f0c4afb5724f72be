//! Lock-free primitives shared between the real-time callback and the main thread.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Cache-line aligned atomic bool.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFlag {
    value: AtomicBool,
}

impl AtomicFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Release);
    }

    #[inline]
    pub fn swap(&self, value: bool) -> bool {
        self.value.swap(value, Ordering::AcqRel)
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Cache-line aligned published cursor position.
///
/// Exactly one thread stores (the audio callback), any number of threads load.
/// Stores are plain Release writes; there is no read-modify-write, so the
/// real-time side never spins.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicCursor {
    value: AtomicUsize,
}

impl AtomicCursor {
    pub fn new(value: usize) -> Self {
        Self {
            value: AtomicUsize::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn get_relaxed(&self) -> usize {
        self.value.load(Ordering::Relaxed)
    }

    /// Publish a new position. Only the owning writer may call this.
    #[inline]
    pub fn publish(&self, value: usize) {
        self.value.store(value, Ordering::Release);
    }
}

impl Default for AtomicCursor {
    fn default() -> Self {
        Self::new(0)
    }
}
