//! Raw acceleration vector and the fixed set of scalar channel extractors.
//!
//! Each monitored channel derives one scalar per telemetry event from the raw
//! vector. The set of channels is a closed enum rather than caller-supplied
//! closures so a channel selection can live in the settings file and be named
//! in exported file names.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AccelVector
// ---------------------------------------------------------------------------

/// Raw 3-axis acceleration reading as pushed by the die, in g.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelVector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the vector.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

// ---------------------------------------------------------------------------
// ChannelKind
// ---------------------------------------------------------------------------

/// One scalar telemetry stream derived from the raw acceleration vector.
///
/// | Variant     | Label   | Extracted value        |
/// |-------------|---------|------------------------|
/// | `AxisX`     | `"X"`   | x component            |
/// | `AxisY`     | `"Y"`   | y component            |
/// | `AxisZ`     | `"Z"`   | z component            |
/// | `Magnitude` | `"Mag"` | Euclidean norm         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    AxisX,
    AxisY,
    AxisZ,
    Magnitude,
}

impl ChannelKind {
    /// Short channel label, used as the suffix of exported file names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AxisX => "X",
            Self::AxisY => "Y",
            Self::AxisZ => "Z",
            Self::Magnitude => "Mag",
        }
    }

    /// Derive this channel's scalar from a raw reading.
    ///
    /// `delta_secs` is the time since the previous telemetry event; the
    /// current kinds are all instantaneous and ignore it, but it is part of
    /// the extractor contract so rate-based kinds can be added without
    /// changing the recorder's fan-out path.
    pub fn extract(&self, acc: AccelVector, _delta_secs: f32) -> f32 {
        match self {
            Self::AxisX => acc.x,
            Self::AxisY => acc.y,
            Self::AxisZ => acc.z,
            Self::Magnitude => acc.magnitude(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
