//! Accelerometer telemetry recording and waveform export for electronic dice.
//!
//! A connected die pushes raw acceleration readings at an irregular,
//! wall-clock-driven cadence. This crate logs each reading into per-channel
//! sample buffers and, on demand, reconstructs every channel as a fixed-rate
//! waveform that an exporter persists as an audio file.
//!
//! # Pipeline
//!
//! ```text
//! die telemetry → TelemetryRecorder fan-out → per-channel SampleBuffer
//!              → (on export) Resampler → fixed-rate f32 buffer → Exporter (WAV)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use die_telemetry::export::WavExporter;
//! use die_telemetry::telemetry::{AccelVector, ChannelKind, Resampler, TelemetryRecorder};
//!
//! let mut recorder = TelemetryRecorder::new(&[
//!     ChannelKind::AxisX,
//!     ChannelKind::AxisY,
//!     ChannelKind::AxisZ,
//! ]);
//!
//! // Pushed by the die connection layer, one reading at a time.
//! recorder.on_telemetry_received(AccelVector::new(0.2, -0.1, 1.0), 0).unwrap();
//! recorder.on_telemetry_received(AccelVector::new(0.4, 0.0, 0.9), 120).unwrap();
//!
//! // Reconstruct each channel at 8 kHz and write `roll_X.wav` etc.
//! let resampler = Resampler::new(8_000, 10.0).unwrap();
//! let mut wav = WavExporter::new("recordings");
//! let written = recorder.export("roll", &resampler, &mut wav);
//! assert_eq!(written, 3);
//! ```
//!
//! Device discovery, pairing and rendering of the live graphs are the host
//! application's concern; the recorder only hands updated buffers to a
//! [`telemetry::GraphObserver`] after each append.

pub mod config;
pub mod export;
pub mod telemetry;
