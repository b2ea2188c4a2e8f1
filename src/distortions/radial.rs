//! Radial distortions - effects measured from the canvas center or a focus
//!
//! Distances are converted to cell units before they enter any formula, so
//! the pattern looks the same at every grid density. A cell sitting exactly
//! on the reference point has no direction and is left where it is.

use std::f32::consts::FRAC_PI_2;

use super::params::{Frame, Placement};
use super::{rotate_vec, Polar};
use crate::grid::Cell;

/// Radians per cell of the circular wave
const CIRCULAR_WAVELENGTH: f32 = 0.16;
const CIRCULAR_SPEED: f32 = 2.0;
const CIRCULAR_ROTATION_DEGREES: f32 = 28.6;

const RIPPLE_FREQUENCY: f32 = 0.9;
const RIPPLE_SPEED: f32 = 3.0;
/// Amplitude halves at 1 / RIPPLE_DAMPING cells from the center
const RIPPLE_DAMPING: f32 = 0.08;
const RIPPLE_ROTATION_DEGREES: f32 = 15.0;

/// Relative change of the distance to the center at full strength
const PULSE_AMPLITUDE: f32 = 0.08;
const PULSE_SPEED: f32 = 2.5;
/// Phase delay per cell, so the pulse travels outwards
const PULSE_LAG: f32 = 0.15;
const PULSE_ROTATION_DEGREES: f32 = 6.0;

/// Twist of the swirl in radians at one cell from the center
const SWIRL_TWIST: f32 = 4.0;
const SWIRL_SPEED: f32 = 0.6;

const TORNADO_TWIST: f32 = 1.6;
const TORNADO_SPEED: f32 = 1.5;
/// Phase lag per cell of the funnel
const TORNADO_LAG: f32 = 0.1;
/// Inward pull in cells at full strength
const TORNADO_SUCTION: f32 = 0.5;

/// Radians per cell along a spiral arm
const SPIRAL_TIGHTNESS: f32 = 0.35;
/// Number of arms; integral so the pattern is continuous across the angle seam
const SPIRAL_ARMS: f32 = 3.0;
const SPIRAL_SPEED: f32 = 1.2;
/// Radial push in cells at full strength
const SPIRAL_RADIAL: f32 = 0.6;
const SPIRAL_TWIST: f32 = 0.8;
const SPIRAL_ROTATION_DEGREES: f32 = 10.0;

const SPIRAL_WAVE_FREQUENCY: f32 = 0.5;
const SPIRAL_WAVE_ARMS: f32 = 2.0;
const SPIRAL_WAVE_SPEED: f32 = 2.5;
const SPIRAL_WAVE_ROTATION_DEGREES: f32 = 20.0;

/// Radius of the lens in cells
const LENS_RADIUS_CELLS: f32 = 6.0;
/// Peak outward push in cells at full strength
const LENS_MAGNIFY: f32 = 2.0;
/// Fraction of the shorter canvas side the focus wanders from the center
const LENS_PATH_FRACTION: f32 = 0.25;
const LENS_SPEED_X: f32 = 0.43;
const LENS_SPEED_Y: f32 = 0.31;
const LENS_ROTATION_DEGREES: f32 = 15.0;

/// Radial wave rolling outward from the center
pub fn circular(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let wave = (polar.cells * CIRCULAR_WAVELENGTH - frame.time * CIRCULAR_SPEED).sin() * frame.strength;
    let push = wave * frame.cell_size;
    let (ux, uy) = polar.unit();

    Placement::offset(cell.base, ux * push, uy * push, wave * CIRCULAR_ROTATION_DEGREES)
}

/// Fast concentric ripples that die out away from the center
pub fn ripple(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let damping = 1.0 / (1.0 + polar.cells * RIPPLE_DAMPING);
    let wave = (polar.cells * RIPPLE_FREQUENCY - frame.time * RIPPLE_SPEED).sin() * damping;
    let push = wave * frame.amplitude();
    let (ux, uy) = polar.unit();

    Placement::offset(
        cell.base,
        ux * push,
        uy * push,
        wave * frame.strength * RIPPLE_ROTATION_DEGREES,
    )
}

/// The whole grid breathes: `distance *= 1 + amplitude * sin(time * speed)`
pub fn pulse(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let scale = PULSE_AMPLITUDE * frame.strength * (frame.time * PULSE_SPEED - polar.cells * PULSE_LAG).sin();
    let p = &cell.params;
    let rotation = (frame.time * PULSE_SPEED * p.frequency + p.rotation_phase).sin()
        * frame.strength
        * PULSE_ROTATION_DEGREES;

    Placement::offset(cell.base, polar.dx * scale, polar.dy * scale, rotation)
}

/// Oscillating twist, inversely proportional to the distance in cells
///
/// The distance is floored at one cell, so the innermost ring turns by at
/// most `SWIRL_TWIST`.
pub fn swirl(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let twist = frame.strength * SWIRL_TWIST * (frame.time * SWIRL_SPEED).sin() / polar.cells.max(1.0);
    let (dx, dy) = rotate_vec((polar.dx, polar.dy), twist);

    Placement::offset(cell.base, dx - polar.dx, dy - polar.dy, twist.to_degrees())
}

/// Funnel: angular advance inversely proportional to distance, plus suction
pub fn tornado(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let spin = frame.strength
        * TORNADO_TWIST
        * (frame.time * TORNADO_SPEED - polar.cells * TORNADO_LAG).sin()
        / polar.cells.max(1.0);

    // Pull scales down inside the first cell so nothing crosses the center
    let pull = frame.amplitude()
        * TORNADO_SUCTION
        * (0.5 + 0.5 * (frame.time * TORNADO_SPEED).sin())
        * polar.cells.min(1.0);
    let shrink = (polar.distance - pull) / polar.distance;

    let (dx, dy) = rotate_vec((polar.dx * shrink, polar.dy * shrink), spin);
    Placement::offset(cell.base, dx - polar.dx, dy - polar.dy, spin.to_degrees())
}

/// Spiral arms: a radial wave whose phase winds with the angle
pub fn spiral(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let phase = polar.cells * SPIRAL_TIGHTNESS - polar.angle * SPIRAL_ARMS - frame.time * SPIRAL_SPEED;
    let arm = phase.sin();
    let advance = frame.strength * SPIRAL_TWIST * phase.cos() / polar.cells.max(1.0);
    let push = frame.amplitude() * SPIRAL_RADIAL * arm;

    let (ux, uy) = polar.unit();
    let pushed = (polar.dx + ux * push, polar.dy + uy * push);
    let (dx, dy) = rotate_vec(pushed, advance);

    Placement::offset(
        cell.base,
        dx - polar.dx,
        dy - polar.dy,
        advance.to_degrees() + arm * frame.strength * SPIRAL_ROTATION_DEGREES,
    )
}

/// Waves travelling along spiral arms, radial and tangential
pub fn spiral_wave(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let phase = polar.cells * SPIRAL_WAVE_FREQUENCY + polar.angle * SPIRAL_WAVE_ARMS
        - frame.time * SPIRAL_WAVE_SPEED;
    let amp = frame.amplitude();
    let radial = phase.sin() * amp;
    let tangential = phase.cos() * amp * 0.5;

    let (ux, uy) = polar.unit();
    Placement::offset(
        cell.base,
        ux * radial - uy * tangential,
        uy * radial + ux * tangential,
        phase.sin() * frame.strength * SPIRAL_WAVE_ROTATION_DEGREES,
    )
}

/// Focus of the lens at `time`: a Lissajous path around the canvas center
pub fn lens_focus(time: f32, canvas_size: (f32, f32)) -> (f32, f32) {
    let reach = canvas_size.0.min(canvas_size.1) * LENS_PATH_FRACTION;
    (
        canvas_size.0 / 2.0 + reach * (time * LENS_SPEED_X).sin(),
        canvas_size.1 / 2.0 + reach * (time * LENS_SPEED_Y + FRAC_PI_2).sin(),
    )
}

/// Bulge pushing cells away from a wandering focus point
///
/// The radius is counted in cells, so a denser grid gets a lens covering
/// the same number of cells rather than the same number of pixels.
pub fn lens(cell: &Cell, frame: &Frame) -> Placement {
    let focus = lens_focus(frame.time, frame.canvas_size);
    let Some(polar) = Polar::about(cell.base, focus, frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let reach = polar.cells / LENS_RADIUS_CELLS;
    if reach >= 1.0 {
        return Placement::at(cell.base);
    }

    // reach * (1 - reach)^2 peaks at 4/27 for reach = 1/3; rescale to 1
    let bulge = 6.75 * reach * (1.0 - reach).powi(2);
    let push = frame.amplitude() * LENS_MAGNIFY * bulge;
    let (ux, uy) = polar.unit();

    Placement::offset(
        cell.base,
        ux * push,
        uy * push,
        bulge * frame.strength * LENS_ROTATION_DEGREES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortions::{CellParams, NoiseField};

    fn frame(noise: &NoiseField, cell_size: f32, strength: f32, time: f32) -> Frame<'_> {
        Frame {
            cell_size,
            strength,
            time,
            canvas_size: (200.0, 200.0),
            noise,
        }
    }

    fn cell_at(x: f32, y: f32) -> Cell {
        Cell::new(0, 0, (x, y), CellParams::neutral())
    }

    #[test]
    fn test_circular_pushes_radially() {
        let noise = NoiseField::new(0);
        // Time chosen so the wave is non-zero at 30 px / 3 cells
        let p = circular(&cell_at(130.0, 100.0), &frame(&noise, 10.0, 1.0, 0.5));
        assert!((p.y - 100.0).abs() < 1e-4);
        let expected = (3.0 * CIRCULAR_WAVELENGTH - 1.0).sin() * 10.0;
        assert!((p.x - (130.0 + expected)).abs() < 1e-3);
    }

    #[test]
    fn test_swirl_preserves_distance() {
        let noise = NoiseField::new(0);
        let base = (140.0, 70.0);
        let p = swirl(&cell_at(base.0, base.1), &frame(&noise, 10.0, 1.0, 2.0));
        let before = ((base.0 - 100.0).powi(2) + (base.1 - 100.0).powi(2)).sqrt();
        let after = ((p.x - 100.0).powi(2) + (p.y - 100.0).powi(2)).sqrt();
        assert!((before - after).abs() < 1e-3);
        assert!(p.displacement(base) > 1e-3);
    }

    #[test]
    fn test_swirl_twist_inverse_to_distance() {
        let noise = NoiseField::new(0);
        let f = frame(&noise, 10.0, 1.0, 2.0);
        let two = swirl(&cell_at(120.0, 100.0), &f);
        let four = swirl(&cell_at(140.0, 100.0), &f);
        assert!(four.rotation.abs() > 1e-3);
        assert!((two.rotation / four.rotation - 2.0).abs() < 1e-3);

        // Floored at one cell
        let inner = swirl(&cell_at(104.0, 100.0), &f);
        let one = swirl(&cell_at(110.0, 100.0), &f);
        assert!((inner.rotation - one.rotation).abs() < 1e-3);
    }

    #[test]
    fn test_tornado_spins_faster_near_center() {
        let noise = NoiseField::new(0);
        let f = frame(&noise, 10.0, 1.0, 1.0);
        let near = tornado(&cell_at(120.0, 100.0), &f);
        let far = tornado(&cell_at(180.0, 100.0), &f);
        assert!(near.rotation.abs() > far.rotation.abs());
    }

    #[test]
    fn test_pulse_scales_distance() {
        let noise = NoiseField::new(0);
        let base = (150.0, 100.0);
        let f = frame(&noise, 10.0, 1.0, 0.8);
        let p = pulse(&cell_at(base.0, base.1), &f);
        let scale = PULSE_AMPLITUDE * (0.8 * PULSE_SPEED - 5.0 * PULSE_LAG).sin();
        assert!((p.x - (150.0 + 50.0 * scale)).abs() < 1e-3);
        assert!((p.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_lens_focus_moves() {
        let a = lens_focus(0.0, (200.0, 200.0));
        let b = lens_focus(3.0, (200.0, 200.0));
        assert!((a.0 - 100.0).abs() < 1e-4);
        assert!((a.1 - 150.0).abs() < 1e-4);
        assert!(((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt() > 1.0);
    }

    #[test]
    fn test_lens_focus_is_not_a_singularity() {
        let noise = NoiseField::new(0);
        for i in 0..8 {
            let time = i as f32 * 1.7;
            let focus = lens_focus(time, (200.0, 200.0));
            let p = lens(&cell_at(focus.0, focus.1), &frame(&noise, 10.0, 1.0, time));
            assert_eq!(p, Placement::at(focus));
            assert!(p.is_finite());
        }
    }

    #[test]
    fn test_lens_only_touches_cells_inside_radius() {
        let noise = NoiseField::new(0);
        let f = frame(&noise, 10.0, 1.0, 0.0);
        let focus = lens_focus(0.0, (200.0, 200.0));

        let inside = (focus.0 + 20.0, focus.1);
        let p = lens(&cell_at(inside.0, inside.1), &f);
        assert!(p.x > inside.0);

        let outside = (focus.0 + 61.0, focus.1);
        assert_eq!(lens(&cell_at(outside.0, outside.1), &f), Placement::at(outside));
    }

    #[test]
    fn test_lens_radius_follows_cell_size() {
        let noise = NoiseField::new(0);
        let focus = lens_focus(0.0, (200.0, 200.0));
        // 40 px is outside a 6-cell lens of 5 px cells but inside one of 10 px cells
        let base = (focus.0 + 40.0, focus.1);
        let small = lens(&cell_at(base.0, base.1), &frame(&noise, 5.0, 1.0, 0.0));
        let large = lens(&cell_at(base.0, base.1), &frame(&noise, 10.0, 1.0, 0.0));
        assert_eq!(small, Placement::at(base));
        assert!(large.displacement(base) > 1e-3);
    }

    #[test]
    fn test_spiral_wave_bounded() {
        let noise = NoiseField::new(0);
        for i in 0..30 {
            let base = (10.0 + i as f32 * 6.0, 190.0 - i as f32 * 4.0);
            let p = spiral_wave(&cell_at(base.0, base.1), &frame(&noise, 10.0, 0.5, i as f32 * 0.3));
            assert!(p.displacement(base) <= 5.0 * 1.118 + 1e-3);
        }
    }
}
