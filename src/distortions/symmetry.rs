//! Symmetry folding - kaleidoscope with a melting twist

use std::f32::consts::TAU;

use super::params::{Frame, Placement};
use super::{rotate_vec, wrap_angle, Polar};
use crate::grid::Cell;

/// Number of mirrored wedges around the center
const KALEIDOSCOPE_SEGMENTS: f32 = 6.0;
/// Peak extra twist of the folded angle in radians
const KALEIDOSCOPE_TWIST: f32 = 0.35;
const KALEIDOSCOPE_SPEED: f32 = 0.4;
/// Twist phase change per cell of distance
const KALEIDOSCOPE_RING: f32 = 0.08;
/// Noise wobble after folding, in cells at full strength
const KALEIDOSCOPE_MELT: f32 = 0.3;
const KALEIDOSCOPE_MELT_SCALE: f32 = 0.15;
const KALEIDOSCOPE_MELT_SPEED: f32 = 0.3;

/// Fold an angle into the first wedge, mirroring the upper half back down
pub fn fold_angle(angle: f32, segments: f32) -> f32 {
    let wedge = TAU / segments;
    let folded = angle.rem_euclid(wedge);
    if folded > wedge * 0.5 {
        wedge - folded
    } else {
        folded
    }
}

/// Pull every cell toward its mirror image in the first wedge
///
/// The folded angle is used directly, without unfolding, which produces
/// the repeating radial symmetry. Strength blends from the unfolded angle
/// (at 0) to the fully folded one (at 1).
pub fn kaleidoscope_twist(cell: &Cell, frame: &Frame) -> Placement {
    let Some(polar) = Polar::about(cell.base, frame.center(), frame.cell_size) else {
        return Placement::at(cell.base);
    };

    let twist = KALEIDOSCOPE_TWIST
        * (frame.time * KALEIDOSCOPE_SPEED + polar.cells * KALEIDOSCOPE_RING).sin();
    let target = fold_angle(polar.angle, KALEIDOSCOPE_SEGMENTS) + twist;
    let turn = wrap_angle(target - polar.angle) * frame.strength;
    let (dx, dy) = rotate_vec((polar.dx, polar.dy), turn);

    let (u, v) = frame.to_cells(cell.base);
    let (mx, my) = frame.noise.sample_pair(
        u * KALEIDOSCOPE_MELT_SCALE,
        v * KALEIDOSCOPE_MELT_SCALE,
        frame.time * KALEIDOSCOPE_MELT_SPEED,
    );
    let melt = frame.amplitude() * KALEIDOSCOPE_MELT;

    Placement::offset(
        cell.base,
        dx - polar.dx + mx * melt,
        dy - polar.dy + my * melt,
        turn.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortions::{CellParams, NoiseField};
    use std::f32::consts::PI;

    #[test]
    fn test_fold_angle_stays_in_half_wedge() {
        let half = TAU / 6.0 / 2.0;
        for i in -50..50 {
            let folded = fold_angle(i as f32 * 0.173, 6.0);
            assert!((0.0..=half + 1e-5).contains(&folded));
        }
    }

    #[test]
    fn test_fold_angle_mirrors() {
        let wedge = TAU / 6.0;
        let a = fold_angle(0.2, 6.0);
        let b = fold_angle(wedge - 0.2, 6.0);
        assert!((a - b).abs() < 1e-5);
        // Every wedge repeats
        let c = fold_angle(0.2 + 3.0 * wedge, 6.0);
        assert!((a - c).abs() < 1e-4);
    }

    #[test]
    fn test_full_strength_lands_on_symmetric_angles() {
        let noise = NoiseField::new(0);
        let f = Frame {
            cell_size: 10.0,
            strength: 1.0,
            time: 0.0,
            canvas_size: (200.0, 200.0),
            noise: &noise,
        };
        // Two cells mirrored across the first wedge boundary at the same radius
        let r = 50.0;
        let angle = 0.3;
        let mirrored = TAU / 6.0 - angle;
        let a_base = (100.0 + r * angle.cos(), 100.0 + r * angle.sin());
        let b_base = (100.0 + r * mirrored.cos(), 100.0 + r * mirrored.sin());
        let a = kaleidoscope_twist(&Cell::new(0, 0, a_base, CellParams::neutral()), &f);
        let b = kaleidoscope_twist(&Cell::new(0, 0, b_base, CellParams::neutral()), &f);

        let angle_of = |p: &Placement| (p.y - 100.0).atan2(p.x - 100.0);
        // Melt noise shifts both a little; the folded angles still nearly agree
        assert!(wrap_angle(angle_of(&a) - angle_of(&b)).abs() < 0.1);
        assert!(angle_of(&a).abs() < PI / 2.0);
    }
}
