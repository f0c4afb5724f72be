//! Test helpers and fixtures for jackpipe integration tests.
//!
//! Fixtures are written to a temporary directory and the session is driven by
//! [`OfflineTransport`], so no audio server is needed.

pub mod tolerances;

use jackpipe::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: u32 = 48000;

/// Small block size so short files span several cycles.
pub const TEST_BLOCK_SIZE: usize = 64;

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (0.5 * (2.0 * std::f64::consts::PI * frequency * t).sin()) as f32
        })
        .collect()
}

/// Write `samples` as a mono 32-bit float WAV file.
pub fn write_float_wav(path: &Path, samples: &[f32], sample_rate: u32) {
    write_float_wav_channels(path, samples, sample_rate, 1);
}

/// Write interleaved `samples` as a float WAV file with `channels` channels.
pub fn write_float_wav_channels(path: &Path, samples: &[f32], sample_rate: u32, channels: u16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create fixture");
    for &s in samples {
        writer.write_sample(s).expect("write fixture sample");
    }
    writer.finalize().expect("finalize fixture");
}

/// Read a written capture back as normalized floats along with its spec.
pub fn read_capture(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let mut reader = hound::WavReader::open(path).expect("open capture");
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .map(|s| s.expect("read capture sample") as f32 / 32768.0)
        .collect();
    (spec, samples)
}

/// Temporary working directory with input and output paths inside it.
pub struct Fixture {
    pub dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = dir.path().join("input.wav");
        let output = dir.path().join("capture.wav");
        Self { dir, input, output }
    }

    /// Parse command-line arguments pointing at this fixture's files.
    pub fn args(&self, frames: usize, extra: &[&str]) -> Args {
        use clap::Parser;

        let frames = frames.to_string();
        let mut argv = vec![
            "jackpipe",
            self.input.to_str().expect("utf-8 temp path"),
            "input",
            "output",
            self.output.to_str().expect("utf-8 temp path"),
            frames.as_str(),
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("valid arguments")
    }
}

/// Offline transport at the test rate feeding its output back to its input.
pub fn loopback() -> OfflineTransport {
    OfflineTransport::new(TEST_SAMPLE_RATE, TEST_BLOCK_SIZE).input(OfflineInput::Loopback)
}

/// Run a session against `transport` with a fresh cancel flag.
pub fn run_offline(args: &Args, transport: OfflineTransport) -> jackpipe::Result<SessionReport> {
    jackpipe::run(args, move |_| Ok(transport), &AtomicFlag::default())
}
