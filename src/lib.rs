//! warpgrid - animated distortions of a regular grid of shapes
//!
//! This crate provides:
//! - `grid`: base positions and seeded per-cell parameters
//! - `distortions`: the catalogue of per-cell transformations and their dispatcher
//! - `animation`: the clock and the per-frame update loop
//! - `colors`, `shapes`: what each cell looks like
//! - `config`: scene files
//! - `export`: PNG rendering of a frame
//!
//! ```no_run
//! use warpgrid::animation::AnimationDriver;
//! use warpgrid::distortions::DistortionKind;
//! use warpgrid::grid::GridModel;
//!
//! let grid = GridModel::build(32, 10.0, (400.0, 400.0), Some(7))?;
//! let mut driver = AnimationDriver::new(grid, DistortionKind::Swirl, 0.5);
//! let placements = driver.update(1.0 / 60.0);
//! assert_eq!(placements.len(), 32 * 32);
//! # Ok::<(), warpgrid::grid::GridError>(())
//! ```

pub mod animation;
pub mod colors;
pub mod config;
pub mod distortions;
pub mod export;
pub mod grid;
pub mod shapes;
