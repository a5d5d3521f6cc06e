//! WAV file exporter — one 16-bit PCM mono file per channel.
//!
//! Waveform values arrive normalized to roughly `[-1.0, 1.0]` (the
//! resampler's scale divisor takes care of that); they are scaled to `i16`
//! full range with clamping, so an out-of-range spike degrades to a clipped
//! sample instead of wrapping.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::export::sink::{ExportError, Exporter};

// ---------------------------------------------------------------------------
// WavExporter
// ---------------------------------------------------------------------------

/// Writes each waveform as `<out_dir>/<name>.wav`, creating the directory on
/// first use.
#[derive(Debug, Clone)]
pub struct WavExporter {
    out_dir: PathBuf,
}

impl WavExporter {
    /// Create an exporter targeting `out_dir`. The directory is created
    /// lazily on the first write, not here.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Full path a given channel name would be written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.wav"))
    }
}

impl Exporter for WavExporter {
    fn write(
        &mut self,
        name: &str,
        samples: &[f32],
        sample_rate_hz: u32,
    ) -> Result<(), ExportError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| ExportError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: sample_rate_hz,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let path = self.path_for(name);
        let encode_err = |source| ExportError::Encode {
            name: name.to_string(),
            source,
        };

        let mut writer = hound::WavWriter::create(&path, spec).map_err(encode_err)?;
        for &sample in samples {
            let int_sample = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer.write_sample(int_sample).map_err(encode_err)?;
        }
        writer.finalize().map_err(encode_err)?;

        info!(
            "wrote {} ({} samples @ {sample_rate_hz} Hz)",
            path.display(),
            samples.len()
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
