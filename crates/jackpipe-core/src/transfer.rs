//! Per-cycle transfer between the sample store and the transport's port buffers.
//!
//! [`TransferEngine::on_cycle`] runs on the transport's real-time thread.
//! It only copies between pre-allocated slices and publishes two atomic
//! cursor positions: no allocation, no locks, no I/O, no logging.

use crate::progress::TransferProgress;
use crate::store::{Cursor, SampleBuffer};
use crate::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// What happens to the part of the output port buffer that playback did not fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailSilence {
    /// Zero every output frame past the copied playback samples.
    #[default]
    Full,
    /// Zero only the first output frame after the copy, every cycle.
    ///
    /// Frames past the playback data keep whatever the transport left in the
    /// port buffer. This mirrors the behaviour of older pipe tools and exists
    /// for bit-compatible comparisons.
    FirstSample,
}

impl fmt::Display for TailSilence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TailSilence::Full => f.write_str("full"),
            TailSilence::FirstSample => f.write_str("first-sample"),
        }
    }
}

impl FromStr for TailSilence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(TailSilence::Full),
            "first-sample" => Ok(TailSilence::FirstSample),
            other => Err(Error::InvalidConfig(format!(
                "unknown tail silence mode '{}' (expected 'full' or 'first-sample')",
                other
            ))),
        }
    }
}

/// Advisory result of a cycle. Transports keep calling the engine either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    Recording,
    Complete,
}

/// Owns both sample buffers while the transport is active.
///
/// The engine is moved into the transport's process handler on activation and
/// handed back on deactivation, so the main thread never touches the buffers
/// while the callback can run.
#[derive(Debug)]
pub struct TransferEngine {
    playback: SampleBuffer,
    playback_cursor: Cursor,
    capture: SampleBuffer,
    capture_cursor: Cursor,
    progress: Arc<TransferProgress>,
    tail_silence: TailSilence,
}

impl TransferEngine {
    pub fn new(playback: SampleBuffer, capture: SampleBuffer, tail_silence: TailSilence) -> Self {
        let progress = Arc::new(TransferProgress::new(playback.len(), capture.len()));

        Self {
            playback_cursor: Cursor::new(playback.len()),
            capture_cursor: Cursor::new(capture.len()),
            playback,
            capture,
            progress,
            tail_silence,
        }
    }

    /// Shared handle for observing the cursors from another thread.
    pub fn progress(&self) -> Arc<TransferProgress> {
        Arc::clone(&self.progress)
    }

    pub fn playback_cursor(&self) -> Cursor {
        self.playback_cursor
    }

    pub fn capture_cursor(&self) -> Cursor {
        self.capture_cursor
    }

    pub fn playback(&self) -> &SampleBuffer {
        &self.playback
    }

    pub fn capture(&self) -> &SampleBuffer {
        &self.capture
    }

    pub fn tail_silence(&self) -> TailSilence {
        self.tail_silence
    }

    /// Release the capture buffer once the transport no longer calls us.
    pub fn into_capture(self) -> SampleBuffer {
        self.capture
    }

    /// Process one transport cycle of `frames` frames.
    ///
    /// Port slices shorter than `frames` are honoured as the real bound.
    #[inline]
    pub fn on_cycle(&mut self, frames: usize, input: &[f32], output: &mut [f32]) -> CycleStatus {
        let out_frames = frames.min(output.len());
        let to_write = out_frames.min(self.playback_cursor.remaining());
        let start = self.playback_cursor.position();
        output[..to_write].copy_from_slice(&self.playback.as_slice()[start..start + to_write]);

        match self.tail_silence {
            TailSilence::Full => output[to_write..out_frames].fill(0.0),
            TailSilence::FirstSample => {
                if out_frames > 0 {
                    output[0] = 0.0;
                }
            }
        }
        self.playback_cursor.advance(to_write);

        let in_frames = frames.min(input.len());
        let to_read = in_frames.min(self.capture_cursor.remaining());
        let start = self.capture_cursor.position();
        self.capture.as_mut_slice()[start..start + to_read].copy_from_slice(&input[..to_read]);
        self.capture_cursor.advance(to_read);

        self.progress.publish(
            self.playback_cursor.position(),
            self.capture_cursor.position(),
        );

        if self.capture_cursor.is_exhausted() {
            CycleStatus::Complete
        } else {
            CycleStatus::Recording
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::allocate_capture;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn engine(playback: Vec<f32>, capture_frames: usize, tail: TailSilence) -> TransferEngine {
        TransferEngine::new(
            SampleBuffer::from_samples(playback, 44100),
            allocate_capture(capture_frames, 44100).unwrap(),
            tail,
        )
    }

    #[test]
    fn test_five_sample_scenario() {
        let mut engine = engine(vec![0.1, 0.2, 0.3, 0.4, 0.5], 3, TailSilence::Full);
        let mut out = [0.0f32; 2];

        let status = engine.on_cycle(2, &[1.0, 2.0], &mut out);
        assert_eq!(engine.playback_cursor().position(), 2);
        assert_eq!(engine.capture_cursor().position(), 2);
        assert_eq!(out, [0.1, 0.2]);
        assert_eq!(status, CycleStatus::Recording);

        let status = engine.on_cycle(2, &[3.0, 4.0], &mut out);
        assert_eq!(engine.playback_cursor().position(), 4);
        assert_eq!(engine.capture_cursor().position(), 3);
        assert_eq!(out, [0.3, 0.4]);
        assert_eq!(status, CycleStatus::Complete);

        let status = engine.on_cycle(2, &[5.0, 6.0], &mut out);
        assert_eq!(engine.playback_cursor().position(), 5);
        assert_eq!(engine.capture_cursor().position(), 3);
        assert_eq!(out, [0.5, 0.0]);
        assert_eq!(status, CycleStatus::Complete);

        assert_eq!(engine.capture().as_slice(), &[1.0, 2.0, 3.0]);

        let progress = engine.progress();
        assert_eq!(progress.played(), 5);
        assert_eq!(progress.captured(), 3);
    }

    #[test]
    fn test_exhausted_playback_full_silence() {
        let mut engine = engine(vec![0.5], 0, TailSilence::Full);
        let mut out = [9.0f32; 4];

        engine.on_cycle(4, &[0.0; 4], &mut out);
        assert_eq!(out, [0.5, 0.0, 0.0, 0.0]);

        let mut out = [9.0f32; 4];
        engine.on_cycle(4, &[0.0; 4], &mut out);
        assert_eq!(out, [0.0; 4]);
    }

    #[test]
    fn test_first_sample_silence_leaves_tail() {
        let mut engine = engine(vec![0.5, 0.25], 0, TailSilence::FirstSample);
        let mut out = [9.0f32; 4];

        engine.on_cycle(4, &[0.0; 4], &mut out);
        assert_eq!(out, [0.0, 0.25, 9.0, 9.0]);

        let mut out = [9.0f32; 4];
        engine.on_cycle(4, &[0.0; 4], &mut out);
        assert_eq!(out, [0.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_zero_capture_completes_immediately() {
        let mut engine = engine(vec![0.1, 0.2], 0, TailSilence::Full);
        assert!(engine.progress().is_capture_complete());

        let mut out = [0.0f32; 2];
        let status = engine.on_cycle(2, &[1.0, 1.0], &mut out);
        assert_eq!(status, CycleStatus::Complete);
        assert!(engine.capture().is_empty());
    }

    #[test]
    fn test_short_port_slices_are_bounds() {
        let mut engine = engine(vec![0.1; 8], 8, TailSilence::Full);
        let mut out = [0.0f32; 2];

        engine.on_cycle(4, &[0.7; 3], &mut out);
        assert_eq!(engine.playback_cursor().position(), 2);
        assert_eq!(engine.capture_cursor().position(), 3);
    }

    #[test]
    fn test_tail_silence_parse() {
        assert_eq!("full".parse::<TailSilence>().unwrap(), TailSilence::Full);
        assert_eq!(
            "first-sample".parse::<TailSilence>().unwrap(),
            TailSilence::FirstSample
        );
        assert!("half".parse::<TailSilence>().is_err());
        assert_eq!(TailSilence::FirstSample.to_string(), "first-sample");
    }

    #[test]
    fn test_capture_copies_input_values() {
        let mut engine = engine(Vec::new(), 4, TailSilence::Full);
        let mut out = [0.0f32; 4];
        engine.on_cycle(4, &[0.25, -0.5, 0.75, -1.0], &mut out);

        let captured = engine.into_capture();
        for (got, want) in captured.as_slice().iter().zip([0.25, -0.5, 0.75, -1.0]) {
            assert_relative_eq!(*got, want);
        }
    }

    proptest! {
        #[test]
        fn prop_playback_cursor_is_clamped_sum(
            playback_len in 0usize..256,
            cycles in proptest::collection::vec(0usize..64, 0..32),
        ) {
            let mut engine = engine(vec![0.5; playback_len], 0, TailSilence::Full);
            let mut out = vec![0.0f32; 64];
            let input = vec![0.0f32; 64];

            for &frames in &cycles {
                engine.on_cycle(frames, &input, &mut out);
                prop_assert!(engine.playback_cursor().position() <= playback_len);
            }

            let total: usize = cycles.iter().sum();
            prop_assert_eq!(engine.playback_cursor().position(), total.min(playback_len));
        }

        #[test]
        fn prop_capture_cursor_monotone_and_frozen_when_full(
            capture_len in 0usize..128,
            cycles in proptest::collection::vec(0usize..48, 0..32),
        ) {
            let mut engine = engine(Vec::new(), capture_len, TailSilence::Full);
            let mut out = vec![0.0f32; 48];
            let mut previous = 0;

            for (i, &frames) in cycles.iter().enumerate() {
                let full_before = engine.capture_cursor().is_exhausted();
                let snapshot = engine.capture().clone();
                let input = vec![i as f32 + 1.0; 48];

                engine.on_cycle(frames, &input, &mut out);

                let position = engine.capture_cursor().position();
                prop_assert!(position >= previous);
                prop_assert!(position <= capture_len);
                if full_before {
                    prop_assert_eq!(engine.capture(), &snapshot);
                }
                previous = position;
            }
        }
    }
}
