//! Render module - UI components for visualization
//!
//! This module provides:
//! - Grid canvas widget drawing every distorted cell

mod canvas;

pub use canvas::{CanvasSettings, GridCanvas};
