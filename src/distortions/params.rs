//! Per-cell parameters and the per-frame inputs shared by all distortions

use std::f32::consts::TAU;

use rand::Rng;

use super::noise_field::NoiseField;

/// Fixed pseudo-random constants of one cell
///
/// Drawn once when the grid is built and never touched again until the
/// grid is regenerated. They desynchronize cells that would otherwise
/// move in lockstep under the same formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellParams {
    /// Static horizontal offset factor (-1.0 to 1.0)
    pub offset_x: f32,
    /// Static vertical offset factor (-1.0 to 1.0)
    pub offset_y: f32,
    /// Horizontal phase in radians (0 to 2π)
    pub phase_x: f32,
    /// Vertical phase in radians (0 to 2π)
    pub phase_y: f32,
    /// Frequency multiplier (0.5 to 2.0)
    pub frequency: f32,
    /// Rotation phase in radians (0 to 2π)
    pub rotation_phase: f32,
}

impl CellParams {
    /// Draw a fresh set of parameters from `rng`
    ///
    /// Always consumes the same number of values in the same order, so a
    /// seeded generator yields the same parameters cell for cell.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            offset_x: rng.gen_range(-1.0..=1.0),
            offset_y: rng.gen_range(-1.0..=1.0),
            phase_x: rng.gen_range(0.0..TAU),
            phase_y: rng.gen_range(0.0..TAU),
            frequency: rng.gen_range(0.5..=2.0),
            rotation_phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Parameters with every phase and offset at zero
    pub fn neutral() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            phase_x: 0.0,
            phase_y: 0.0,
            frequency: 1.0,
            rotation_phase: 0.0,
        }
    }
}

impl Default for CellParams {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Where a cell ends up for one frame
///
/// `rotation` is in degrees and unrestricted; renderers normalize it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl Placement {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }

    /// The undistorted placement of a base position
    pub fn at(base: (f32, f32)) -> Self {
        Self::new(base.0, base.1, 0.0)
    }

    /// Placement displaced from `base` by `(dx, dy)`
    pub fn offset(base: (f32, f32), dx: f32, dy: f32, rotation: f32) -> Self {
        Self::new(base.0 + dx, base.1 + dy, rotation)
    }

    /// Distance from `base` to this placement
    pub fn displacement(&self, base: (f32, f32)) -> f32 {
        let dx = self.x - base.0;
        let dy = self.y - base.1;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.rotation.is_finite()
    }
}

/// Global inputs of one dispatch pass
///
/// Identical for every cell of a frame. The noise field is a read-only
/// lookup table, so any number of passes may share it.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Pixels per cell (> 0)
    pub cell_size: f32,
    /// Global intensity, usually 0.0 to 1.0
    pub strength: f32,
    /// Elapsed animation time in seconds
    pub time: f32,
    /// Canvas width and height in pixels
    pub canvas_size: (f32, f32),
    /// Seeded gradient noise
    pub noise: &'a NoiseField,
}

impl<'a> Frame<'a> {
    /// Maximum displacement unit: one cell at full strength
    pub fn amplitude(&self) -> f32 {
        self.cell_size * self.strength
    }

    /// Canvas center in pixels
    pub fn center(&self) -> (f32, f32) {
        (self.canvas_size.0 / 2.0, self.canvas_size.1 / 2.0)
    }

    /// Convert a pixel position into cell units
    pub fn to_cells(&self, pos: (f32, f32)) -> (f32, f32) {
        (pos.0 / self.cell_size, pos.1 / self.cell_size)
    }
}
