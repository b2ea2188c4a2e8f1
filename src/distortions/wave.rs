//! Wave distortions - static jitter, sine wobble, shear and moiré
//!
//! Each displaces a cell by `amplitude * sin(coordinate * frequency + phase + time * speed)`
//! along one or both axes, where the amplitude is one cell at full strength.

use super::params::{Frame, Placement};
use crate::grid::Cell;

/// Rotation of the random jitter, as a fraction of the cell's rotation phase
const RANDOM_ROTATION: f32 = 0.2;

/// Peak rotation of the sine wobble in degrees
const SINE_ROTATION_DEGREES: f32 = 17.0;

/// Shear wave frequency in radians per cell
const SHEAR_FREQUENCY: f32 = 0.35;
const SHEAR_SPEED: f32 = 1.5;
/// How much each cell's phase desynchronizes the shear
const SHEAR_JITTER: f32 = 0.15;
const SHEAR_ROTATION_DEGREES: f32 = 12.0;

/// Base moiré frequency in radians per cell
const MOIRE_FREQUENCY: f32 = 0.6;
/// Ratio between the two overlaid frequencies
const MOIRE_DETUNE: f32 = 1.08;
/// Relative swing of the slowly drifting base frequency
const MOIRE_DRIFT: f32 = 0.15;
const MOIRE_DRIFT_SPEED: f32 = 0.1;
const MOIRE_SPEED: f32 = 1.2;
const MOIRE_ROTATION_DEGREES: f32 = 10.0;

/// Static offset drawn from the cell's random offsets; ignores time
pub fn random(cell: &Cell, frame: &Frame) -> Placement {
    let amp = frame.amplitude();
    let p = &cell.params;
    Placement::offset(
        cell.base,
        p.offset_x * amp,
        p.offset_y * amp,
        p.rotation_phase.to_degrees() * frame.strength * RANDOM_ROTATION,
    )
}

/// Each cell wobbles on its own frequency and phase
pub fn sine(cell: &Cell, frame: &Frame) -> Placement {
    let amp = frame.amplitude();
    let p = &cell.params;
    let t = frame.time * p.frequency;

    let dx = (t + p.phase_x).sin() * amp;
    let dy = (t + p.phase_y).sin() * amp;
    let rotation = (frame.time + p.rotation_phase).sin() * frame.strength * SINE_ROTATION_DEGREES;

    Placement::offset(cell.base, dx, dy, rotation)
}

/// Rows slide horizontally against each other, columns bob vertically
pub fn shear(cell: &Cell, frame: &Frame) -> Placement {
    let amp = frame.amplitude();
    let (u, v) = frame.to_cells(cell.base);
    let t = frame.time;

    let row_wave = (v * SHEAR_FREQUENCY + t * SHEAR_SPEED + cell.params.phase_x * SHEAR_JITTER).sin();
    let col_wave = (u * SHEAR_FREQUENCY * 0.5 - t * SHEAR_SPEED * 0.7).sin();

    Placement::offset(
        cell.base,
        row_wave * amp,
        col_wave * amp * 0.5,
        row_wave * frame.strength * SHEAR_ROTATION_DEGREES,
    )
}

/// Two slightly detuned waves per axis beat against each other
///
/// The base frequency drifts with time, so the interference bands slowly
/// morph instead of just scrolling.
pub fn moire(cell: &Cell, frame: &Frame) -> Placement {
    let amp = frame.amplitude();
    let (u, v) = frame.to_cells(cell.base);
    let t = frame.time;

    let f1 = MOIRE_FREQUENCY * (1.0 + MOIRE_DRIFT * (t * MOIRE_DRIFT_SPEED).sin());
    let f2 = f1 * MOIRE_DETUNE;

    // x follows waves across rows, y waves across columns
    let wave_x = 0.5 * ((v * f1 + t * MOIRE_SPEED).sin() + (v * f2 - t * MOIRE_SPEED * 0.8).sin());
    let wave_y = 0.5 * ((u * f1 - t * MOIRE_SPEED).sin() + (u * f2 + t * MOIRE_SPEED * 0.9).sin());

    Placement::offset(
        cell.base,
        wave_x * amp,
        wave_y * amp,
        (wave_x - wave_y) * frame.strength * MOIRE_ROTATION_DEGREES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortions::{CellParams, NoiseField};
    use std::f32::consts::FRAC_PI_2;

    fn frame(noise: &NoiseField, strength: f32, time: f32) -> Frame<'_> {
        Frame {
            cell_size: 10.0,
            strength,
            time,
            canvas_size: (200.0, 200.0),
            noise,
        }
    }

    #[test]
    fn test_random_offsets_follow_params() {
        let noise = NoiseField::new(0);
        let params = CellParams {
            offset_x: 0.5,
            offset_y: -0.3,
            ..CellParams::neutral()
        };
        let cell = Cell::new(0, 0, (100.0, 100.0), params);
        let p = random(&cell, &frame(&noise, 0.5, 3.0));
        assert!((p.x - 102.5).abs() < 1e-4);
        assert!((p.y - 98.5).abs() < 1e-4);
    }

    #[test]
    fn test_random_ignores_time() {
        let noise = NoiseField::new(0);
        let cell = Cell::new(0, 0, (50.0, 50.0), CellParams {
            offset_x: 0.2,
            rotation_phase: 1.0,
            ..CellParams::neutral()
        });
        assert_eq!(random(&cell, &frame(&noise, 0.7, 0.0)), random(&cell, &frame(&noise, 0.7, 9.0)));
    }

    #[test]
    fn test_sine_quarter_phase() {
        let noise = NoiseField::new(0);
        let cell = Cell::new(0, 0, (100.0, 100.0), CellParams {
            phase_y: FRAC_PI_2,
            ..CellParams::neutral()
        });
        let p = sine(&cell, &frame(&noise, 1.0, 0.0));
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!((p.y - 110.0).abs() < 1e-4);
    }

    #[test]
    fn test_sine_follows_frequency() {
        let noise = NoiseField::new(0);
        let cell = Cell::new(0, 0, (0.0, 0.0), CellParams {
            frequency: 2.0,
            ..CellParams::neutral()
        });
        let p = sine(&cell, &frame(&noise, 1.0, 0.25));
        assert!((p.x - 10.0 * 0.5f32.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_shear_rows_move_together() {
        let noise = NoiseField::new(0);
        let f = frame(&noise, 1.0, 1.3);
        let a = shear(&Cell::new(2, 0, (0.0, 20.0), CellParams::neutral()), &f);
        let b = shear(&Cell::new(2, 5, (50.0, 20.0), CellParams::neutral()), &f);
        assert!(((a.x - 0.0) - (b.x - 50.0)).abs() < 1e-4);
    }

    #[test]
    fn test_moire_bounded_by_amplitude() {
        let noise = NoiseField::new(0);
        for i in 0..40 {
            let t = i as f32 * 0.7;
            let base = (i as f32 * 13.0, i as f32 * 7.0);
            let p = moire(&Cell::new(0, 0, base, CellParams::neutral()), &frame(&noise, 0.5, t));
            assert!((p.x - base.0).abs() <= 5.0 + 1e-4);
            assert!((p.y - base.1).abs() <= 5.0 + 1e-4);
        }
    }
}
