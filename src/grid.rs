//! Grid model - base positions and per-cell parameters
//!
//! A `GridModel` is one generation of the grid: `dimension * dimension`
//! cells in row-major order, each with a fixed base position and a set of
//! random parameters drawn from a single seeded generator. Changing the
//! dimension or cell size throws the whole generation away.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::distortions::{CellParams, Frame, NoiseField};

/// Normalization of the center distance used for coloring (≈ √0.5)
const COLOR_DISTANCE_NORM: f32 = 0.707;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// One grid element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Undistorted position in pixels
    pub base: (f32, f32),
    pub params: CellParams,
}

impl Cell {
    pub fn new(row: usize, col: usize, base: (f32, f32), params: CellParams) -> Self {
        Self {
            row,
            col,
            base,
            params,
        }
    }

    /// Flat row-major index
    pub fn index(&self, dimension: usize) -> usize {
        self.row * dimension + self.col
    }
}

#[derive(Clone, Debug)]
pub struct GridModel {
    dimension: usize,
    cell_size: f32,
    canvas_size: (f32, f32),
    seed: u64,
    cells: Vec<Cell>,
    noise: NoiseField,
}

fn validate(dimension: usize, cell_size: f32, canvas_size: (f32, f32)) -> Result<(), GridError> {
    if dimension == 0 {
        return Err(GridError::InvalidConfiguration(
            "dimension must be at least 1".to_string(),
        ));
    }
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(GridError::InvalidConfiguration(format!(
            "cell size must be positive and finite, got {cell_size}"
        )));
    }
    let (w, h) = canvas_size;
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(GridError::InvalidConfiguration(format!(
            "canvas size must be positive and finite, got {w}x{h}"
        )));
    }
    Ok(())
}

/// Cell-centred base positions, with the grid centred on the canvas
fn base_positions(dimension: usize, cell_size: f32, canvas_size: (f32, f32)) -> impl Iterator<Item = (usize, usize, (f32, f32))> {
    let span = (dimension - 1) as f32 * cell_size;
    let offset_x = (canvas_size.0 - span) / 2.0;
    let offset_y = (canvas_size.1 - span) / 2.0;
    (0..dimension).flat_map(move |row| {
        (0..dimension).map(move |col| {
            (
                row,
                col,
                (offset_x + col as f32 * cell_size, offset_y + row as f32 * cell_size),
            )
        })
    })
}

impl GridModel {
    /// Build a new grid generation
    ///
    /// Without a seed a random one is drawn and recorded, so the generation
    /// can be reproduced later through [`GridModel::seed`].
    pub fn build(
        dimension: usize,
        cell_size: f32,
        canvas_size: (f32, f32),
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        validate(dimension, cell_size, canvas_size)?;
        let seed = seed.unwrap_or_else(rand::random::<u64>);

        let mut rng = StdRng::seed_from_u64(seed);
        let cells = base_positions(dimension, cell_size, canvas_size)
            .map(|(row, col, base)| Cell::new(row, col, base, CellParams::generate(&mut rng)))
            .collect();

        log::debug!(
            "Built {}x{} grid, cell size {}, canvas {}x{}, seed {}",
            dimension,
            dimension,
            cell_size,
            canvas_size.0,
            canvas_size.1,
            seed
        );

        Ok(Self {
            dimension,
            cell_size,
            canvas_size,
            seed,
            cells,
            noise: NoiseField::from_grid_seed(seed),
        })
    }

    /// Rebuild with a new dimension and cell size on the same canvas
    ///
    /// Every cell gets fresh parameters from a newly drawn seed. Validates
    /// first; on error the grid is left untouched.
    pub fn resize(&mut self, dimension: usize, cell_size: f32) -> Result<(), GridError> {
        *self = Self::build(dimension, cell_size, self.canvas_size, None)?;
        log::debug!("Resized grid, new seed {}", self.seed);
        Ok(())
    }

    /// Redraw every cell's parameters with a new seed (random when `None`)
    pub fn regenerate(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        for cell in &mut self.cells {
            cell.params = CellParams::generate(&mut rng);
        }
        self.seed = seed;
        self.noise = NoiseField::from_grid_seed(seed);
        log::info!("Regenerated grid parameters with seed {}", seed);
    }

    /// Recentre the grid on a new canvas; parameters are kept
    pub fn set_canvas_size(&mut self, canvas_size: (f32, f32)) -> Result<(), GridError> {
        validate(self.dimension, self.cell_size, canvas_size)?;
        for (cell, (_, _, base)) in self
            .cells
            .iter_mut()
            .zip(base_positions(self.dimension, self.cell_size, canvas_size))
        {
            cell.base = base;
        }
        self.canvas_size = canvas_size;
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.dimension && col < self.dimension {
            self.cells.get(row * self.dimension + col)
        } else {
            None
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.canvas_size.0 / 2.0, self.canvas_size.1 / 2.0)
    }

    /// Frame inputs for one dispatch pass over this grid
    pub fn frame(&self, strength: f32, time: f32) -> Frame<'_> {
        Frame {
            cell_size: self.cell_size,
            strength,
            time,
            canvas_size: self.canvas_size,
            noise: &self.noise,
        }
    }

    /// Coloring inputs of a cell: `(x_norm, y_norm, distance_to_center)`
    ///
    /// All three lie in 0.0 to 1.0 and depend only on grid coordinates,
    /// never on the distorted position.
    pub fn color_inputs(&self, cell: &Cell) -> (f32, f32, f32) {
        let norm = |i: usize| {
            if self.dimension > 1 {
                i as f32 / (self.dimension - 1) as f32
            } else {
                0.5
            }
        };
        let x_norm = norm(cell.col);
        let y_norm = norm(cell.row);
        let dx = x_norm - 0.5;
        let dy = y_norm - 0.5;
        let distance = ((dx * dx + dy * dy).sqrt() / COLOR_DISTANCE_NORM).min(1.0);
        (x_norm, y_norm, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cell_count_and_order() {
        let grid = GridModel::build(4, 10.0, (100.0, 100.0), Some(1)).unwrap();
        assert_eq!(grid.cells().len(), 16);
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.index(4), i);
        }
        assert_eq!(grid.cells()[5].row, 1);
        assert_eq!(grid.cells()[5].col, 1);
    }

    #[test]
    fn test_base_positions_centred() {
        let grid = GridModel::build(4, 10.0, (100.0, 100.0), Some(1)).unwrap();
        let first = grid.cells()[0].base;
        let last = grid.cells()[15].base;
        assert!((first.0 - 35.0).abs() < 1e-5);
        assert!((first.1 - 35.0).abs() < 1e-5);
        assert!((last.0 - 65.0).abs() < 1e-5);
        assert!(((first.0 + last.0) / 2.0 - 50.0).abs() < 1e-5);
    }

    #[test]
    fn test_base_positions_regular() {
        let grid = GridModel::build(5, 8.0, (200.0, 120.0), Some(2)).unwrap();
        for cell in grid.cells() {
            if let Some(right) = grid.cell(cell.row, cell.col + 1) {
                assert!((right.base.0 - cell.base.0 - 8.0).abs() < 1e-4);
                assert_eq!(right.base.1, cell.base.1);
            }
        }
        assert!(grid.cell(5, 0).is_none());
    }

    #[test]
    fn test_build_deterministic() {
        let a = GridModel::build(6, 10.0, (100.0, 100.0), Some(42)).unwrap();
        let b = GridModel::build(6, 10.0, (100.0, 100.0), Some(42)).unwrap();
        let c = GridModel::build(6, 10.0, (100.0, 100.0), Some(43)).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_ne!(a.cells(), c.cells());
    }

    #[test]
    fn test_random_seed_is_recorded() {
        let a = GridModel::build(3, 10.0, (100.0, 100.0), None).unwrap();
        let b = GridModel::build(3, 10.0, (100.0, 100.0), Some(a.seed())).unwrap();
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            GridModel::build(0, 10.0, (100.0, 100.0), Some(1)),
            Err(GridError::InvalidConfiguration(_))
        ));
        assert!(GridModel::build(4, 0.0, (100.0, 100.0), Some(1)).is_err());
        assert!(GridModel::build(4, -3.0, (100.0, 100.0), Some(1)).is_err());
        assert!(GridModel::build(4, f32::NAN, (100.0, 100.0), Some(1)).is_err());
        assert!(GridModel::build(4, 10.0, (0.0, 100.0), Some(1)).is_err());
        assert!(GridModel::build(4, 10.0, (100.0, f32::INFINITY), Some(1)).is_err());
    }

    #[test]
    fn test_resize_rebuilds_everything() {
        let mut grid = GridModel::build(4, 10.0, (100.0, 100.0), Some(9)).unwrap();
        let before = grid.cells().to_vec();
        grid.resize(6, 5.0).unwrap();
        assert_eq!(grid.dimension(), 6);
        assert_eq!(grid.cells().len(), 36);
        assert_ne!(grid.seed(), 9);

        let reused = before
            .iter()
            .zip(grid.cells())
            .filter(|(old, new)| old.params == new.params)
            .count();
        assert_eq!(reused, 0);

        // The drawn seed still reproduces the new generation
        let again = GridModel::build(6, 5.0, (100.0, 100.0), Some(grid.seed())).unwrap();
        assert_eq!(grid.cells(), again.cells());
    }

    #[test]
    fn test_resize_invalid_leaves_grid() {
        let mut grid = GridModel::build(4, 10.0, (100.0, 100.0), Some(9)).unwrap();
        let before = grid.cells().to_vec();
        assert!(grid.resize(0, 10.0).is_err());
        assert_eq!(grid.dimension(), 4);
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_regenerate_keeps_positions() {
        let mut grid = GridModel::build(4, 10.0, (100.0, 100.0), Some(3)).unwrap();
        let before = grid.cells().to_vec();
        grid.regenerate(Some(4));
        assert_eq!(grid.seed(), 4);
        for (old, new) in before.iter().zip(grid.cells()) {
            assert_eq!(old.base, new.base);
        }
        assert_ne!(before[0].params, grid.cells()[0].params);
    }

    #[test]
    fn test_set_canvas_size_recentres() {
        let mut grid = GridModel::build(3, 10.0, (100.0, 100.0), Some(3)).unwrap();
        let params = grid.cells()[4].params;
        grid.set_canvas_size((200.0, 60.0)).unwrap();
        assert_eq!(grid.cells()[4].base, (100.0, 30.0));
        assert_eq!(grid.cells()[4].params, params);
        assert!(grid.set_canvas_size((-1.0, 60.0)).is_err());
        assert_eq!(grid.canvas_size(), (200.0, 60.0));
    }

    #[test]
    fn test_color_inputs() {
        let grid = GridModel::build(3, 10.0, (100.0, 100.0), Some(3)).unwrap();
        let (x, y, d) = grid.color_inputs(&grid.cells()[4]);
        assert_eq!((x, y), (0.5, 0.5));
        assert!(d.abs() < 1e-6);

        let (x, y, d) = grid.color_inputs(&grid.cells()[8]);
        assert_eq!((x, y), (1.0, 1.0));
        assert!((d - 1.0).abs() < 1e-6);

        let single = GridModel::build(1, 10.0, (100.0, 100.0), Some(3)).unwrap();
        assert_eq!(single.color_inputs(&single.cells()[0]), (0.5, 0.5, 0.0));
    }
}
