//! Distortions - per-cell transformations of the grid
//!
//! A distortion is a pure function of a cell and the frame inputs that
//! returns where the cell is drawn and how it is turned. Nothing here keeps
//! state between frames: the same grid, kind, strength and time always give
//! the same placements.
//!
//! ```text
//! GridModel ──► Frame { cell_size, strength, time, canvas, noise }
//!                  │
//!   Cell ──► DistortionKind::function() ──► Placement { x, y, rotation° }
//! ```

mod kind;
mod noise_field;
mod params;

pub mod noise;
pub mod parity;
pub mod radial;
pub mod symmetry;
pub mod wave;

pub use kind::{DistortionError, DistortionKind};
pub use noise_field::NoiseField;
pub use params::{CellParams, Frame, Placement};

use std::f32::consts::{PI, TAU};

use crate::grid::{Cell, GridModel};

/// Distances below this many pixels count as sitting on the reference point
pub(crate) const SINGULARITY_EPS: f32 = 1e-4;

/// Signature shared by every transformation
pub type DistortionFn = fn(&Cell, &Frame) -> Placement;

/// A position expressed relative to a reference point
#[derive(Clone, Copy, Debug)]
pub(crate) struct Polar {
    pub dx: f32,
    pub dy: f32,
    /// Distance in pixels
    pub distance: f32,
    /// Distance in cells
    pub cells: f32,
    /// Angle in radians, -π to π
    pub angle: f32,
}

impl Polar {
    /// `None` when `pos` coincides with `origin` and has no direction
    pub fn about(pos: (f32, f32), origin: (f32, f32), cell_size: f32) -> Option<Self> {
        let dx = pos.0 - origin.0;
        let dy = pos.1 - origin.1;
        let distance = (dx * dx + dy * dy).sqrt();
        if !(distance >= SINGULARITY_EPS) {
            return None;
        }
        Some(Self {
            dx,
            dy,
            distance,
            cells: distance / cell_size,
            angle: dy.atan2(dx),
        })
    }

    /// Unit vector pointing away from the origin
    pub fn unit(&self) -> (f32, f32) {
        (self.dx / self.distance, self.dy / self.distance)
    }
}

/// Rotate a vector counter-clockwise by `angle` radians
pub(crate) fn rotate_vec(v: (f32, f32), angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (v.0 * c - v.1 * s, v.0 * s + v.1 * c)
}

/// Wrap an angle into -π to π
pub(crate) fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

impl DistortionKind {
    /// The transformation implementing this kind
    pub fn function(&self) -> DistortionFn {
        match self {
            DistortionKind::Random => wave::random,
            DistortionKind::Sine => wave::sine,
            DistortionKind::Perlin => noise::perlin,
            DistortionKind::Circular => radial::circular,
            DistortionKind::Swirl => radial::swirl,
            DistortionKind::Ripple => radial::ripple,
            DistortionKind::Flow => noise::flow,
            DistortionKind::Pulse => radial::pulse,
            DistortionKind::Checkerboard => parity::checkerboard,
            DistortionKind::CheckerboardDiagonal => parity::checkerboard_diagonal,
            DistortionKind::Tornado => radial::tornado,
            DistortionKind::Spiral => radial::spiral,
            DistortionKind::Shear => wave::shear,
            DistortionKind::Lens => radial::lens,
            DistortionKind::SpiralWave => radial::spiral_wave,
            DistortionKind::NoiseRotation => noise::noise_rotation,
            DistortionKind::CurlWarp => noise::curl_warp,
            DistortionKind::FractalNoise => noise::fractal_noise,
            DistortionKind::Moire => wave::moire,
            DistortionKind::KaleidoscopeTwist => symmetry::kaleidoscope_twist,
        }
    }
}

/// Transform a single cell
pub fn apply(kind: DistortionKind, cell: &Cell, frame: &Frame) -> Placement {
    (kind.function())(cell, frame)
}

/// Fill `out` with one placement per cell, in grid order
///
/// Reuses the buffer's allocation between frames.
pub fn distort_into(
    grid: &GridModel,
    kind: DistortionKind,
    strength: f32,
    time: f32,
    out: &mut Vec<Placement>,
) {
    let frame = grid.frame(strength, time);
    let f = kind.function();
    out.clear();
    out.extend(grid.cells().iter().map(|cell| f(cell, &frame)));
}

/// Placements of every cell for one frame, in grid order
pub fn get_distorted_positions(
    grid: &GridModel,
    kind: DistortionKind,
    strength: f32,
    time: f32,
) -> Vec<Placement> {
    let mut out = Vec::with_capacity(grid.cells().len());
    distort_into(grid, kind, strength, time, &mut out);
    out
}

/// Like [`get_distorted_positions`], with the kind given by name
///
/// The name is checked before any cell is touched.
pub fn get_distorted_positions_by_name(
    grid: &GridModel,
    kind: &str,
    strength: f32,
    time: f32,
) -> Result<Vec<Placement>, DistortionError> {
    let kind: DistortionKind = kind.parse()?;
    Ok(get_distorted_positions(grid, kind, strength, time))
}
