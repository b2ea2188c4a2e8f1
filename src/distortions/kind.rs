//! Distortion kinds - the closed catalogue of grid transformations
//!
//! Every kind maps to exactly one transformation function in this module
//! tree. The string names are the stable identifiers used by scene files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistortionError {
    #[error("Unsupported distortion kind: {0}")]
    UnsupportedKind(String),
}

/// Available distortion kinds
///
/// Serialized by its snake_case name; unknown names are rejected with
/// [`DistortionError::UnsupportedKind`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistortionKind {
    /// Static per-cell jitter
    #[default]
    Random,
    /// Per-cell sine wobble
    Sine,
    /// Smooth gradient-noise offsets
    Perlin,
    /// Radial wave travelling out from the center
    Circular,
    /// Oscillating twist around the center
    Swirl,
    /// Damped concentric ripples
    Ripple,
    /// Advection through a noise-angle field
    Flow,
    /// Breathing zoom around the center
    Pulse,
    /// Neighbours swing against each other
    Checkerboard,
    /// Checkerboard swinging along the diagonal
    CheckerboardDiagonal,
    /// Funnel spin, faster near the center
    Tornado,
    /// Spiral arms coupling radius and angle
    Spiral,
    /// Rows and columns sliding against each other
    Shear,
    /// Magnifying bulge following a moving focus
    Lens,
    /// Waves travelling along spiral arms
    SpiralWave,
    /// Rotation from noise, position untouched
    NoiseRotation,
    /// Advection through a divergence-free field
    CurlWarp,
    /// Multi-octave noise offsets
    FractalNoise,
    /// Interference of close wave frequencies
    Moire,
    /// Angular folding into mirrored wedges
    KaleidoscopeTwist,
}

impl DistortionKind {
    pub const ALL: &[DistortionKind] = &[
        Self::Random,
        Self::Sine,
        Self::Perlin,
        Self::Circular,
        Self::Swirl,
        Self::Ripple,
        Self::Flow,
        Self::Pulse,
        Self::Checkerboard,
        Self::CheckerboardDiagonal,
        Self::Tornado,
        Self::Spiral,
        Self::Shear,
        Self::Lens,
        Self::SpiralWave,
        Self::NoiseRotation,
        Self::CurlWarp,
        Self::FractalNoise,
        Self::Moire,
        Self::KaleidoscopeTwist,
    ];

    /// Get all distortion kinds
    pub fn all() -> &'static [DistortionKind] {
        Self::ALL
    }

    /// Stable snake_case identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sine => "sine",
            Self::Perlin => "perlin",
            Self::Circular => "circular",
            Self::Swirl => "swirl",
            Self::Ripple => "ripple",
            Self::Flow => "flow",
            Self::Pulse => "pulse",
            Self::Checkerboard => "checkerboard",
            Self::CheckerboardDiagonal => "checkerboard_diagonal",
            Self::Tornado => "tornado",
            Self::Spiral => "spiral",
            Self::Shear => "shear",
            Self::Lens => "lens",
            Self::SpiralWave => "spiral_wave",
            Self::NoiseRotation => "noise_rotation",
            Self::CurlWarp => "curl_warp",
            Self::FractalNoise => "fractal_noise",
            Self::Moire => "moire",
            Self::KaleidoscopeTwist => "kaleidoscope_twist",
        }
    }

    /// Human readable label for the UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Sine => "Sine",
            Self::Perlin => "Perlin",
            Self::Circular => "Circular",
            Self::Swirl => "Swirl",
            Self::Ripple => "Ripple",
            Self::Flow => "Flow",
            Self::Pulse => "Pulse",
            Self::Checkerboard => "Checkerboard",
            Self::CheckerboardDiagonal => "Checker Diagonal",
            Self::Tornado => "Tornado",
            Self::Spiral => "Spiral",
            Self::Shear => "Shear",
            Self::Lens => "Lens",
            Self::SpiralWave => "Spiral Wave",
            Self::NoiseRotation => "Noise Rotation",
            Self::CurlWarp => "Curl Warp",
            Self::FractalNoise => "Fractal Noise",
            Self::Moire => "Moire",
            Self::KaleidoscopeTwist => "Kaleidoscope",
        }
    }

    /// Whether the kind measures distances from the canvas center or a focus
    pub fn is_center_relative(&self) -> bool {
        matches!(
            self,
            Self::Circular
                | Self::Swirl
                | Self::Ripple
                | Self::Pulse
                | Self::Tornado
                | Self::Spiral
                | Self::SpiralWave
                | Self::Lens
                | Self::KaleidoscopeTwist
        )
    }

    /// Whether the kind only ever changes rotation
    pub fn is_rotation_only(&self) -> bool {
        matches!(self, Self::NoiseRotation)
    }

    /// The kind after this one, wrapping around
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DistortionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for DistortionKind {
    type Error = DistortionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DistortionKind> for String {
    fn from(kind: DistortionKind) -> Self {
        kind.name().to_string()
    }
}

impl FromStr for DistortionKind {
    type Err = DistortionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DistortionError::UnsupportedKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_has_twenty_unique_names() {
        let mut names: Vec<&str> = DistortionKind::all().iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), 20);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for kind in DistortionKind::all() {
            assert_eq!(kind.name().parse::<DistortionKind>(), Ok(*kind));
        }
        assert_eq!("  Spiral_Wave ".parse::<DistortionKind>(), Ok(DistortionKind::SpiralWave));
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "mouse_attraction".parse::<DistortionKind>().unwrap_err();
        assert_eq!(err, DistortionError::UnsupportedKind("mouse_attraction".into()));
        assert_eq!(err.to_string(), "Unsupported distortion kind: mouse_attraction");
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&DistortionKind::CheckerboardDiagonal).unwrap();
        assert_eq!(json, "\"checkerboard_diagonal\"");
        let kind: DistortionKind = serde_json::from_str("\"curl_warp\"").unwrap();
        assert_eq!(kind, DistortionKind::CurlWarp);
        let err = serde_json::from_str::<DistortionKind>("\"plasma\"").unwrap_err();
        assert!(err.to_string().contains("Unsupported distortion kind: plasma"));
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(DistortionKind::Random.next(), DistortionKind::Sine);
        assert_eq!(DistortionKind::KaleidoscopeTwist.next(), DistortionKind::Random);
    }
}
