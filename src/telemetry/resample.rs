//! Reconstruction of an irregular sample log as a fixed-rate waveform.
//!
//! The die reports readings whenever its radio gets around to it, so the
//! recorded log is sparse and unevenly spaced. [`Resampler::run`] rebuilds it
//! as a uniformly spaced buffer spanning exactly the recorded time range:
//! piecewise-linear interpolation between consecutive readings, then the last
//! recorded value held constant for any output slots past its aligned index.
//!
//! Output indices are computed in integer millisecond arithmetic; floating
//! point enters only for the interpolation fraction and the values. Keeping
//! that ordering avoids accumulated drift over long recordings.
//!
//! # Example
//!
//! ```rust
//! use die_telemetry::telemetry::{Resampler, SampleBuffer};
//!
//! let mut buf = SampleBuffer::new();
//! buf.append(0, 0.0).unwrap();
//! buf.append(1_000, 10.0).unwrap();
//!
//! // 1 s recorded span at 10 Hz → 10 output samples, 0.0 → 9.0
//! let resampler = Resampler::new(10, 1.0).unwrap();
//! let out = resampler.run(&buf).unwrap();
//! assert_eq!(out.len(), 10);
//! assert!((out[3] - 3.0).abs() < 1e-5);
//! ```

use thiserror::Error;

use crate::telemetry::sample::SampleBuffer;

// ---------------------------------------------------------------------------
// ResampleError
// ---------------------------------------------------------------------------

/// Reason a waveform could not be reconstructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// The scale divisor is zero. Programmer error — fail fast.
    #[error("scale divisor must be non-zero")]
    InvalidScale,

    /// The output sample rate is zero. Programmer error — fail fast.
    #[error("sample rate must be non-zero")]
    InvalidRate,

    /// Fewer than two recorded samples — there is no interval to
    /// interpolate over.
    #[error("need at least 2 samples to resample, got {0}")]
    TooFewSamples(usize),
}

// ---------------------------------------------------------------------------
// Resampler
// ---------------------------------------------------------------------------

/// Converts a [`SampleBuffer`] into a fixed-rate `f32` waveform.
///
/// Every output value is divided by `scale`, which callers pick so the
/// acceleration range lands inside the normalized amplitude range of the
/// target audio format (the die reports up to ±8 g; `scale = 10.0` keeps
/// that inside ±1.0).
#[derive(Debug, Clone, Copy)]
pub struct Resampler {
    sample_rate_hz: u32,
    scale: f32,
}

impl Resampler {
    /// Create a resampler producing `sample_rate_hz` output with every value
    /// divided by `scale`.
    ///
    /// # Errors
    ///
    /// - [`ResampleError::InvalidScale`] when `scale == 0.0`.
    /// - [`ResampleError::InvalidRate`] when `sample_rate_hz == 0`.
    pub fn new(sample_rate_hz: u32, scale: f32) -> Result<Self, ResampleError> {
        if scale == 0.0 {
            return Err(ResampleError::InvalidScale);
        }
        if sample_rate_hz == 0 {
            return Err(ResampleError::InvalidRate);
        }
        Ok(Self {
            sample_rate_hz,
            scale,
        })
    }

    /// Output sample rate in Hz.
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Reconstruct `buffer` as a fixed-rate waveform.
    ///
    /// The output has `ceil(span_millis * rate / 1000)` samples, covering the
    /// recorded span even when it is not an exact multiple of the output
    /// period. A buffer whose samples all share one timestamp has a zero span
    /// and yields an empty waveform.
    ///
    /// # Errors
    ///
    /// [`ResampleError::TooFewSamples`] when `buffer` holds fewer than two
    /// samples.
    pub fn run(&self, buffer: &SampleBuffer) -> Result<Vec<f32>, ResampleError> {
        let samples = buffer.samples();
        if samples.len() < 2 {
            return Err(ResampleError::TooFewSamples(samples.len()));
        }

        let start = samples[0].millis;
        let span = (samples[samples.len() - 1].millis - start) as u64;
        let rate = self.sample_rate_hz as u64;

        // ceil(span * rate / 1000) in integer arithmetic.
        let count = ((span * rate + 999) / 1000) as usize;
        let mut out = vec![0.0_f32; count];
        if count == 0 {
            return Ok(out);
        }

        for pair in samples.windows(2) {
            let idx_start = self.aligned_index(pair[0].millis - start);
            let idx_end = self.aligned_index(pair[1].millis - start);

            // Zero-width interval (duplicate timestamps, or two readings
            // landing in one output slot) — an instantaneous step, nothing
            // to interpolate.
            if idx_end == idx_start {
                continue;
            }

            let width = (idx_end - idx_start) as f32;
            for j in idx_start..idx_end {
                let pct = (j - idx_start) as f32 / width;
                out[j] = lerp(pair[0].value, pair[1].value, pct) / self.scale;
            }
        }

        // Hold the final reading for every slot past its aligned index.
        let last = samples[samples.len() - 1];
        let idx_last = self.aligned_index(last.millis - start);
        let hold = last.value / self.scale;
        for slot in out.iter_mut().skip(idx_last) {
            *slot = hold;
        }

        Ok(out)
    }

    /// Output index a recording offset (ms from the first sample) maps to.
    fn aligned_index(&self, offset_millis: u32) -> usize {
        (offset_millis as u64 * self.sample_rate_hz as u64 / 1000) as usize
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
