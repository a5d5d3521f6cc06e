//! Append-only log of timestamped scalar samples for one telemetry channel.
//!
//! The die's sampling clock drives the timestamps, so they arrive
//! non-decreasing in normal operation — but the input is wall-clock data, so
//! [`SampleBuffer::append`] still guards against a timestamp that moves
//! backwards. Two consecutive readings *may* share a timestamp (the clock has
//! millisecond resolution); the resampler treats such a pair as an
//! instantaneous step.
//!
//! # Example
//!
//! ```rust
//! use die_telemetry::telemetry::SampleBuffer;
//!
//! let mut buf = SampleBuffer::new();
//! buf.append(0, 0.5).unwrap();
//! buf.append(120, -0.3).unwrap();
//! assert_eq!(buf.len(), 2);
//! assert_eq!(buf.span_millis(), 120);
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// SampleError
// ---------------------------------------------------------------------------

/// Reason a [`SampleBuffer`] operation was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// An append carried a timestamp earlier than the last recorded one.
    #[error("out-of-order sample: {got} ms is earlier than last recorded {last} ms")]
    OutOfOrder { last: u32, got: u32 },

    /// `first()` / `last()` called on a buffer with no samples.
    #[error("sample buffer is empty")]
    Empty,
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One recorded telemetry reading. Immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Device clock timestamp in milliseconds.
    pub millis: u32,
    /// Extracted scalar value (one axis, magnitude, …).
    pub value: f32,
}

// ---------------------------------------------------------------------------
// SampleBuffer
// ---------------------------------------------------------------------------

/// Ordered, timestamped sample log owned by exactly one channel.
///
/// Grows monotonically between [`clear`](Self::clear) calls. Timestamps are
/// non-decreasing: an append with a strictly smaller timestamp than the last
/// recorded one fails with [`SampleError::OutOfOrder`] and leaves the buffer
/// untouched; an equal timestamp is accepted.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
}

impl SampleBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new sample.
    ///
    /// # Errors
    ///
    /// [`SampleError::OutOfOrder`] when `millis` is earlier than the last
    /// appended timestamp. The buffer is unchanged on failure.
    pub fn append(&mut self, millis: u32, value: f32) -> Result<(), SampleError> {
        if let Some(last) = self.samples.last() {
            if millis < last.millis {
                return Err(SampleError::OutOfOrder {
                    last: last.millis,
                    got: millis,
                });
            }
        }
        self.samples.push(Sample { millis, value });
        Ok(())
    }

    /// Discard all samples. Channel identity (who owns the buffer) is a
    /// caller concern and unaffected.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest recorded sample.
    ///
    /// # Errors
    ///
    /// [`SampleError::Empty`] when the buffer holds no samples.
    pub fn first(&self) -> Result<Sample, SampleError> {
        self.samples.first().copied().ok_or(SampleError::Empty)
    }

    /// Newest recorded sample.
    ///
    /// # Errors
    ///
    /// [`SampleError::Empty`] when the buffer holds no samples.
    pub fn last(&self) -> Result<Sample, SampleError> {
        self.samples.last().copied().ok_or(SampleError::Empty)
    }

    /// Time range covered by the recording in milliseconds.
    ///
    /// Zero when fewer than two samples exist.
    pub fn span_millis(&self) -> u32 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.millis - first.millis,
            _ => 0,
        }
    }

    /// All recorded samples in append (== time) order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
