//! Settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files. Defaults match the
//! original demo rig: X/Y/Z channels, 8 kHz export, scale divisor 10.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::telemetry::{ChannelKind, ResampleError, Resampler};

// ---------------------------------------------------------------------------
// ChannelConfig
// ---------------------------------------------------------------------------

/// Which scalar channels to record from the raw acceleration vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Recorded channels, in display/export order.
    pub kinds: Vec<ChannelKind>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            kinds: vec![ChannelKind::AxisX, ChannelKind::AxisY, ChannelKind::AxisZ],
        }
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Settings for waveform reconstruction and WAV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output sample rate of the reconstructed waveform in Hz.
    pub sample_rate_hz: u32,
    /// Divisor applied to every output value. The die reports up to ±8 g;
    /// `10.0` keeps that inside the normalized ±1.0 amplitude range.
    pub scale: f32,
    /// Where exported WAV files land — `None` means the platform data dir
    /// (see [`AppPaths`]).
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 8_000,
            scale: 10.0,
            output_dir: None,
        }
    }
}

impl ExportConfig {
    /// Build the [`Resampler`] these settings describe.
    ///
    /// # Errors
    ///
    /// Propagates [`ResampleError::InvalidScale`] / [`ResampleError::InvalidRate`]
    /// for a hand-edited settings file with a zero scale or rate.
    pub fn resampler(&self) -> Result<Resampler, ResampleError> {
        Resampler::new(self.sample_rate_hz, self.scale)
    }

    /// The effective output directory, resolving `None` to the platform
    /// default recordings dir.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| AppPaths::new().recordings_dir)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use die_telemetry::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Recorded channel set.
    pub channels: ChannelConfig,
    /// Waveform reconstruction / WAV export settings.
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
