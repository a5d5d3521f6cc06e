//! The exporter collaborator interface.
//!
//! [`Exporter`] is object-safe so the recorder can drive any sink through
//! `&mut dyn Exporter` — the shipped [`WavExporter`](crate::export::WavExporter),
//! or a test double.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ExportError
// ---------------------------------------------------------------------------

/// Reason a waveform could not be persisted.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// WAV encoding or the underlying file write failed.
    #[error("failed to encode {name}: {source}")]
    Encode { name: String, source: hound::Error },
}

// ---------------------------------------------------------------------------
// Exporter trait
// ---------------------------------------------------------------------------

/// Consumes a reconstructed fixed-rate waveform and persists it.
///
/// # Contract
///
/// - `name` is already channel-qualified (`"{prefix}_{label}"`) and carries
///   no file extension — the exporter decides the container format.
/// - `samples` is a non-empty fixed-rate `f32` buffer at `sample_rate_hz`.
pub trait Exporter {
    /// Persist `samples` under `name`.
    fn write(
        &mut self,
        name: &str,
        samples: &[f32],
        sample_rate_hz: u32,
    ) -> Result<(), ExportError>;
}

// Compile-time assertion: Box<dyn Exporter> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Exporter>) {}
};

// ---------------------------------------------------------------------------
// MockExporter  (test-only)
// ---------------------------------------------------------------------------

/// One recorded [`Exporter::write`] invocation.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCall {
    pub name: String,
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
}

/// A test double that records every write in memory, optionally failing for
/// one configured name so partial-failure paths can be exercised.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockExporter {
    pub calls: Vec<ExportCall>,
    fail_for: Option<String>,
}

#[cfg(test)]
impl MockExporter {
    /// A mock that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that fails writes for `name` and accepts everything else.
    pub fn failing_for(name: impl Into<String>) -> Self {
        Self {
            calls: Vec::new(),
            fail_for: Some(name.into()),
        }
    }
}

#[cfg(test)]
impl Exporter for MockExporter {
    fn write(
        &mut self,
        name: &str,
        samples: &[f32],
        sample_rate_hz: u32,
    ) -> Result<(), ExportError> {
        if self.fail_for.as_deref() == Some(name) {
            return Err(ExportError::Encode {
                name: name.to_string(),
                source: hound::Error::IoError(std::io::Error::other("mock failure")),
            });
        }
        self.calls.push(ExportCall {
            name: name.to_string(),
            samples: samples.to_vec(),
            sample_rate_hz,
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
