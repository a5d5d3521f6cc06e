//! Telemetry pipeline — sample logging → channel fan-out → resampling.
//!
//! # Pipeline
//!
//! ```text
//! AccelVector (die push) → TelemetryRecorder → ChannelKind::extract
//!                        → SampleBuffer append → GraphObserver notify
//!                        → (export) Resampler → fixed-rate f32 waveform
//! ```

pub mod channel;
pub mod recorder;
pub mod resample;
pub mod sample;

pub use channel::{AccelVector, ChannelKind};
pub use recorder::{GraphObserver, TelemetryRecorder};
pub use resample::{ResampleError, Resampler};
pub use sample::{Sample, SampleBuffer, SampleError};
