//! WAV codec using hound
//!
//! Reads mono WAV files of any bit depth into f32 and writes captures as
//! mono 16-bit PCM.

use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use jackpipe_core::SampleBuffer;
use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Bit depth of every file written by [`write_output`].
pub const OUTPUT_BITS_PER_SAMPLE: u16 = 16;

/// Load a whole mono WAV file as the playback buffer.
///
/// Integer samples are scaled by `2^(bits - 1)` into `[-1.0, 1.0)`; float
/// samples are kept bit for bit.
pub fn load_playback(path: impl AsRef<Path>) -> Result<SampleBuffer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = WavReader::new(BufReader::new(file)).map_err(|e| Error::codec(path, e))?;
    let buffer = decode_mono(reader, path)?;

    debug!(
        "loaded {}: {} frames at {} Hz",
        path.display(),
        buffer.len(),
        buffer.sample_rate()
    );
    Ok(buffer)
}

fn decode_mono<R: Read>(reader: WavReader<R>, path: &Path) -> Result<SampleBuffer> {
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
            channels: spec.channels,
        });
    }

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>(),
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()
        }
    }
    .map_err(|e| Error::codec(path, e))?;

    Ok(SampleBuffer::from_samples(samples, spec.sample_rate))
}

#[inline]
fn int_scale(bits_per_sample: u16) -> f32 {
    1.0 / (1u64 << (bits_per_sample.saturating_sub(1))) as f32
}

/// Write the capture buffer as a mono 16-bit PCM WAV file.
pub fn write_output(path: impl AsRef<Path>, capture: &SampleBuffer) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        WavWriter::create(path, output_spec(capture.sample_rate())).map_err(|e| Error::codec(path, e))?;

    write_pcm16(&mut writer, capture.as_slice()).map_err(|e| Error::codec(path, e))?;
    writer.finalize().map_err(|e| Error::codec(path, e))?;

    debug!(
        "wrote {}: {} frames at {} Hz",
        path.display(),
        capture.len(),
        capture.sample_rate()
    );
    Ok(())
}

fn output_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: OUTPUT_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

fn write_pcm16<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    samples: &[f32],
) -> std::result::Result<(), hound::Error> {
    for &sample in samples {
        writer.write_sample(float_to_i16(sample))?;
    }
    Ok(())
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0).round() as i16
}
