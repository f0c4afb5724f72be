//! Sound-file boundary for jackpipe.
//!
//! - [`load_playback`]: read a whole mono WAV file into a [`SampleBuffer`]
//! - [`write_output`]: write a capture buffer as mono 16-bit PCM WAV
//!
//! [`SampleBuffer`]: jackpipe_core::SampleBuffer

pub mod error;
pub use error::{Error, Result};

pub mod wav;
pub use wav::{load_playback, write_output};
