//! Waveform persistence — the exporter collaborator and its WAV
//! implementation.
//!
//! The recorder hands each reconstructed channel to an [`Exporter`] together
//! with its channel-qualified name and sample rate; everything about the
//! on-disk format is the exporter's concern. [`WavExporter`] is the shipped
//! implementation: one 16-bit PCM mono WAV file per channel.

pub mod sink;
pub mod wav;

pub use sink::{ExportError, Exporter};
pub use wav::WavExporter;

#[cfg(test)]
pub use sink::{ExportCall, MockExporter};
