//! Fixed-capacity sample buffers and their cursors.
//!
//! Buffers are allocated once, before the transport is activated, and are
//! never resized afterwards. The boxed slice makes that structural: there is
//! no API that could grow or shrink a [`SampleBuffer`].

use crate::{Error, Result};

/// Owned mono f32 samples at a declared sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Box<[f32]>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Take ownership of decoded samples. Used for the playback buffer.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into_boxed_slice(),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Retag the declared rate. The samples are not touched.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Capacity in frames (one frame is one mono sample).
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.samples.into_vec()
    }
}

/// Reserve a zero-filled capture buffer of `frames` samples.
///
/// Allocation failure is reported instead of aborting the process.
pub fn allocate_capture(frames: usize, sample_rate: u32) -> Result<SampleBuffer> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(frames)
        .map_err(|_| Error::OutOfMemory { frames })?;
    samples.resize(frames, 0.0);

    Ok(SampleBuffer {
        samples: samples.into_boxed_slice(),
        sample_rate,
    })
}

/// Monotonic offset into a buffer of fixed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    capacity: usize,
}

impl Cursor {
    pub fn new(capacity: usize) -> Self {
        Self {
            position: 0,
            capacity,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.position
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position == self.capacity
    }

    /// Advance by at most `frames`, clamped to the remaining capacity.
    /// Returns the amount actually advanced.
    #[inline]
    pub fn advance(&mut self, frames: usize) -> usize {
        let step = frames.min(self.remaining());
        self.position += step;
        step
    }
}
