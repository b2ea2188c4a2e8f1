//! Animation - the clock and the per-frame update loop
//!
//! The driver owns the grid and a reusable placement buffer. Each frame it
//! advances the clock once and recomputes every placement.

use crate::distortions::{distort_into, DistortionKind, Placement};
use crate::grid::{GridError, GridModel};

/// Monotonic elapsed-time accumulator in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    time: f32,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds; negative or non-finite deltas count as zero
    pub fn tick(&mut self, delta: f32) {
        if delta.is_finite() && delta >= 0.0 {
            self.time += delta;
        } else {
            log::warn!("Ignoring invalid frame delta {}", delta);
        }
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    pub fn current_time(&self) -> f32 {
        self.time
    }
}

/// Drives a grid through time with one distortion kind
pub struct AnimationDriver {
    grid: GridModel,
    clock: AnimationClock,
    kind: DistortionKind,
    strength: f32,
    placements: Vec<Placement>,
}

impl AnimationDriver {
    pub fn new(grid: GridModel, kind: DistortionKind, strength: f32) -> Self {
        let mut driver = Self {
            grid,
            clock: AnimationClock::new(),
            kind,
            strength,
            placements: Vec::new(),
        };
        driver.recompute();
        driver
    }

    fn recompute(&mut self) {
        distort_into(
            &self.grid,
            self.kind,
            self.strength,
            self.clock.current_time(),
            &mut self.placements,
        );
    }

    pub fn tick(&mut self, delta: f32) {
        self.clock.tick(delta);
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    pub fn current_time(&self) -> f32 {
        self.clock.current_time()
    }

    /// Advance the clock once and recompute every placement
    pub fn update(&mut self, delta: f32) -> &[Placement] {
        self.clock.tick(delta);
        self.recompute();
        &self.placements
    }

    /// Placements of the last computed frame, index-aligned with the cells
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn kind(&self) -> DistortionKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: DistortionKind) {
        if kind != self.kind {
            log::info!("Distortion changed to {}", kind);
            self.kind = kind;
            self.recompute();
        }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength;
        self.recompute();
    }

    /// Rebuild the grid and restart the clock
    pub fn resize(&mut self, dimension: usize, cell_size: f32) -> Result<(), GridError> {
        self.grid.resize(dimension, cell_size)?;
        self.clock.reset();
        self.recompute();
        Ok(())
    }

    /// New random parameters, clock back to zero
    pub fn regenerate(&mut self, seed: Option<u64>) {
        self.grid.regenerate(seed);
        self.clock.reset();
        self.recompute();
    }

    /// Follow a resized canvas without disturbing the animation
    pub fn set_canvas_size(&mut self, canvas_size: (f32, f32)) -> Result<(), GridError> {
        self.grid.set_canvas_size(canvas_size)?;
        self.recompute();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortions::get_distorted_positions;

    fn driver() -> AnimationDriver {
        let grid = GridModel::build(4, 10.0, (100.0, 100.0), Some(1)).unwrap();
        AnimationDriver::new(grid, DistortionKind::Sine, 0.5)
    }

    #[test]
    fn test_clock_accumulates() {
        let mut clock = AnimationClock::new();
        clock.tick(0.5);
        clock.tick(0.25);
        assert!((clock.current_time() - 0.75).abs() < 1e-6);
        clock.reset();
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn test_clock_clamps_bad_deltas() {
        let mut clock = AnimationClock::new();
        clock.tick(1.0);
        clock.tick(-0.5);
        clock.tick(f32::NAN);
        clock.tick(f32::INFINITY);
        assert!((clock.current_time() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_update_matches_dispatcher() {
        let mut d = driver();
        let out = d.update(0.3).to_vec();
        let expected = get_distorted_positions(d.grid(), DistortionKind::Sine, 0.5, 0.3);
        assert_eq!(out, expected);
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn test_initial_frame_at_time_zero() {
        let d = driver();
        let expected = get_distorted_positions(d.grid(), DistortionKind::Sine, 0.5, 0.0);
        assert_eq!(d.placements(), &expected[..]);
    }

    #[test]
    fn test_regenerate_resets_clock() {
        let mut d = driver();
        d.update(2.0);
        d.regenerate(Some(5));
        assert_eq!(d.current_time(), 0.0);
        assert_eq!(d.grid().seed(), 5);
    }

    #[test]
    fn test_resize_resets_clock() {
        let mut d = driver();
        d.update(2.0);
        d.resize(6, 8.0).unwrap();
        assert_eq!(d.current_time(), 0.0);
        assert_eq!(d.placements().len(), 36);

        assert!(d.resize(0, 8.0).is_err());
        assert_eq!(d.placements().len(), 36);
    }

    #[test]
    fn test_set_kind_recomputes() {
        let mut d = driver();
        d.update(1.0);
        d.set_kind(DistortionKind::Swirl);
        let expected = get_distorted_positions(d.grid(), DistortionKind::Swirl, 0.5, 1.0);
        assert_eq!(d.placements(), &expected[..]);
    }

    #[test]
    fn test_canvas_change_keeps_time() {
        let mut d = driver();
        d.update(1.5);
        d.set_canvas_size((300.0, 200.0)).unwrap();
        assert!((d.current_time() - 1.5).abs() < 1e-6);
    }
}
