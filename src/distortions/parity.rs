//! Grid-parity distortions - neighbours pull in opposite directions
//!
//! The sign of the swing comes from the cell's grid coordinates, the
//! magnitude from a single shared oscillation, so two adjacent cells are
//! always exact mirror images of each other.

use std::f32::consts::FRAC_1_SQRT_2;

use super::params::{Frame, Placement};
use crate::grid::Cell;

const CHECKER_SPEED: f32 = 2.0;
/// Vertical swing relative to the horizontal one
const CHECKER_LIFT: f32 = 0.5;
const CHECKER_ROTATION_DEGREES: f32 = 20.0;

/// +1 for even, -1 for odd
fn parity_sign(value: i64) -> f32 {
    if value.rem_euclid(2) == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Tug of war on the orthogonal checkerboard `(row + col) % 2`
pub fn checkerboard(cell: &Cell, frame: &Frame) -> Placement {
    let amp = frame.amplitude();
    let sign = parity_sign(cell.row as i64 + cell.col as i64);
    let phase = frame.time * CHECKER_SPEED;
    let swing = phase.sin();

    Placement::offset(
        cell.base,
        sign * swing * amp,
        sign * phase.cos() * amp * CHECKER_LIFT,
        sign * swing * frame.strength * CHECKER_ROTATION_DEGREES,
    )
}

/// Tug of war along the diagonal, sign from `(row - col) mod 2`
pub fn checkerboard_diagonal(cell: &Cell, frame: &Frame) -> Placement {
    let amp = frame.amplitude();
    let sign = parity_sign(cell.row as i64 - cell.col as i64);
    let swing = (frame.time * CHECKER_SPEED).sin();
    let along = sign * swing * amp * FRAC_1_SQRT_2;

    Placement::offset(
        cell.base,
        along,
        along,
        -sign * swing * frame.strength * CHECKER_ROTATION_DEGREES,
    )
}
