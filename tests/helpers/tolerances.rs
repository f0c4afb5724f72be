//! Tolerance constants for capture comparisons.

/// 16-bit quantization step size.
/// Use when comparing a written capture with the samples that produced it.
pub const INT16_EPSILON: f32 = 1.0 / 32768.0;
