//! Noise distortions - smooth organic motion from seeded gradient noise
//!
//! The field is sampled at `(x / scale, y / scale, time * speed)` with
//! positions in cell units. Flow and curl warp treat the noise as a
//! velocity field and advect the cell a fixed number of steps through it.

use std::f32::consts::TAU;

use super::params::{Frame, Placement};
use crate::grid::Cell;

/// Noise-space units per cell
const PERLIN_SCALE: f32 = 0.12;
const PERLIN_SPEED: f32 = 0.35;
/// Perlin output rarely leaves ±0.7, so boost it to about one cell
const PERLIN_GAIN: f32 = 1.5;
const PERLIN_ROTATION_DEGREES: f32 = 25.0;

const FRACTAL_SCALE: f32 = 0.08;
const FRACTAL_SPEED: f32 = 0.25;
const FRACTAL_OCTAVES: u32 = 4;
const FRACTAL_GAIN: f32 = 1.8;
const FRACTAL_ROTATION_DEGREES: f32 = 30.0;

const FLOW_SCALE: f32 = 0.06;
const FLOW_SPEED: f32 = 0.15;
const FLOW_STEPS: usize = 3;
/// Cells travelled per step at full strength
const FLOW_STEP: f32 = 0.5;
/// Full turns of heading across the noise range
const FLOW_TURNS: f32 = 1.0;
const FLOW_ROTATION: f32 = 0.25;

const CURL_SCALE: f32 = 0.07;
const CURL_SPEED: f32 = 0.2;
const CURL_STEPS: usize = 3;
const CURL_STEP: f32 = 0.6;
const CURL_ROTATION: f32 = 0.2;

const NOISE_ROTATION_SCALE: f32 = 0.1;
const NOISE_ROTATION_SPEED: f32 = 0.25;
const NOISE_ROTATION_DEGREES: f32 = 90.0;
/// Per-cell wobble layered over the shared noise
const NOISE_ROTATION_WOBBLE_DEGREES: f32 = 5.0;

/// Two noise channels offset the cell directly
pub fn perlin(cell: &Cell, frame: &Frame) -> Placement {
    let (u, v) = frame.to_cells(cell.base);
    let (nx, ny) = frame.noise.sample_pair(
        u * PERLIN_SCALE,
        v * PERLIN_SCALE,
        frame.time * PERLIN_SPEED,
    );
    let amp = frame.amplitude() * PERLIN_GAIN;

    Placement::offset(
        cell.base,
        nx * amp,
        ny * amp,
        nx * frame.strength * PERLIN_ROTATION_DEGREES,
    )
}

/// Octave-summed noise: broad drift with fine grain on top
pub fn fractal_noise(cell: &Cell, frame: &Frame) -> Placement {
    let (u, v) = frame.to_cells(cell.base);
    let (nx, ny) = frame.noise.fractal(
        u * FRACTAL_SCALE,
        v * FRACTAL_SCALE,
        frame.time * FRACTAL_SPEED,
        FRACTAL_OCTAVES,
    );
    let amp = frame.amplitude() * FRACTAL_GAIN;

    Placement::offset(
        cell.base,
        nx * amp,
        ny * amp,
        (nx - ny) * frame.strength * FRACTAL_ROTATION_DEGREES,
    )
}

/// Follow a heading field whose angle comes from the noise
pub fn flow(cell: &Cell, frame: &Frame) -> Placement {
    let (u, v) = frame.to_cells(cell.base);
    let z = frame.time * FLOW_SPEED;
    let step = FLOW_STEP * frame.strength;

    let (mut dx, mut dy, mut heading) = (0.0f32, 0.0f32, 0.0f32);
    for _ in 0..FLOW_STEPS {
        let n = frame.noise.sample((u + dx) * FLOW_SCALE, (v + dy) * FLOW_SCALE, z);
        heading = n * TAU * FLOW_TURNS;
        dx += heading.cos() * step;
        dy += heading.sin() * step;
    }

    Placement::offset(
        cell.base,
        dx * frame.cell_size,
        dy * frame.cell_size,
        heading.to_degrees() * frame.strength * FLOW_ROTATION,
    )
}

/// Advect through the curl of the noise, which neither converges nor diverges
pub fn curl_warp(cell: &Cell, frame: &Frame) -> Placement {
    let (u, v) = frame.to_cells(cell.base);
    let z = frame.time * CURL_SPEED;
    let step = CURL_STEP * frame.strength;

    let (mut dx, mut dy) = (0.0f32, 0.0f32);
    let mut velocity = (0.0f32, 0.0f32);
    for _ in 0..CURL_STEPS {
        let (cx, cy) = frame.noise.curl((u + dx) * CURL_SCALE, (v + dy) * CURL_SCALE, z);
        // Cap the speed at one step so steep gradients cannot fling cells away
        let speed = (cx * cx + cy * cy).sqrt();
        velocity = if speed > 1.0 { (cx / speed, cy / speed) } else { (cx, cy) };
        dx += velocity.0 * step;
        dy += velocity.1 * step;
    }

    Placement::offset(
        cell.base,
        dx * frame.cell_size,
        dy * frame.cell_size,
        velocity.1.atan2(velocity.0).to_degrees() * frame.strength * CURL_ROTATION,
    )
}

/// Position stays put; the noise only turns the shape
pub fn noise_rotation(cell: &Cell, frame: &Frame) -> Placement {
    let (u, v) = frame.to_cells(cell.base);
    let n = frame.noise.sample(
        u * NOISE_ROTATION_SCALE,
        v * NOISE_ROTATION_SCALE,
        frame.time * NOISE_ROTATION_SPEED,
    );
    let p = &cell.params;
    let wobble = (frame.time * p.frequency + p.rotation_phase).sin() * NOISE_ROTATION_WOBBLE_DEGREES;

    Placement::new(
        cell.base.0,
        cell.base.1,
        (n * NOISE_ROTATION_DEGREES + wobble) * frame.strength,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortions::{CellParams, NoiseField};

    fn frame(noise: &NoiseField, strength: f32, time: f32) -> Frame<'_> {
        Frame {
            cell_size: 10.0,
            strength,
            time,
            canvas_size: (320.0, 320.0),
            noise,
        }
    }

    fn cells() -> Vec<Cell> {
        (0..32)
            .map(|i| {
                let row = i / 8;
                let col = i % 8;
                Cell::new(row, col, (col as f32 * 37.0 + 5.0, row as f32 * 41.0 + 3.0), CellParams::neutral())
            })
            .collect()
    }

    #[test]
    fn test_perlin_moves_some_cells() {
        let noise = NoiseField::new(17);
        let f = frame(&noise, 1.0, 1.7);
        assert!(cells().iter().any(|c| perlin(c, &f).displacement(c.base) > 0.5));
    }

    #[test]
    fn test_noise_is_seeded() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = cells()
            .iter()
            .any(|c| perlin(c, &frame(&a, 1.0, 0.4)) != perlin(c, &frame(&b, 1.0, 0.4)));
        assert!(differs);
    }

    #[test]
    fn test_flow_step_budget() {
        let noise = NoiseField::new(4);
        let f = frame(&noise, 1.0, 2.0);
        for c in cells() {
            let max = FLOW_STEPS as f32 * FLOW_STEP * 10.0;
            assert!(flow(&c, &f).displacement(c.base) <= max + 1e-3);
        }
    }

    #[test]
    fn test_curl_warp_step_budget() {
        let noise = NoiseField::new(9);
        let f = frame(&noise, 0.5, 3.1);
        for c in cells() {
            let p = curl_warp(&c, &f);
            assert!(p.is_finite());
            assert!(p.displacement(c.base) <= CURL_STEPS as f32 * CURL_STEP * 0.5 * 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_fractal_noise_is_smooth_across_neighbours() {
        let noise = NoiseField::new(21);
        let f = frame(&noise, 1.0, 0.9);
        let a = fractal_noise(&Cell::new(0, 0, (100.0, 100.0), CellParams::neutral()), &f);
        let b = fractal_noise(&Cell::new(0, 0, (100.5, 100.0), CellParams::neutral()), &f);
        assert!(((a.x - 100.0) - (b.x - 100.5)).abs() < 0.5);
    }

    #[test]
    fn test_noise_rotation_keeps_position() {
        let noise = NoiseField::new(8);
        for strength in [0.0, 0.5, 1.0, 3.0] {
            for c in cells() {
                let p = noise_rotation(&c, &frame(&noise, strength, 5.0));
                assert_eq!((p.x, p.y), c.base);
            }
        }
    }

    #[test]
    fn test_noise_rotation_turns_cells() {
        let noise = NoiseField::new(8);
        let f = frame(&noise, 1.0, 5.0);
        assert!(cells().iter().any(|c| noise_rotation(c, &f).rotation.abs() > 1.0));
    }
}
