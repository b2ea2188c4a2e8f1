//! Scene configuration - the flat key/value description of a scene
//!
//! ```json
//! {
//!   "dimension": 64,
//!   "cell_size": 8.0,
//!   "canvas_size": [1200, 900],
//!   "distortion_type": "swirl",
//!   "distortion_strength": 0.3,
//!   "seed": 42
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distortions::DistortionKind;
use crate::grid::{GridError, GridModel};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Everything needed to rebuild a scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub dimension: usize,
    pub cell_size: f32,
    pub canvas_size: (u32, u32),
    pub distortion_type: DistortionKind,
    pub distortion_strength: f32,
    /// `None` picks a random seed when the grid is built
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dimension: 64,
            cell_size: 8.0,
            canvas_size: (1200, 900),
            distortion_type: DistortionKind::Random,
            distortion_strength: 0.3,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn canvas_size_f32(&self) -> (f32, f32) {
        (self.canvas_size.0 as f32, self.canvas_size.1 as f32)
    }

    /// Check the grid bounds without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension == 0 {
            return Err(GridError::InvalidConfiguration("dimension must be at least 1".to_string()).into());
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GridError::InvalidConfiguration(format!(
                "cell size must be positive and finite, got {}",
                self.cell_size
            ))
            .into());
        }
        if self.canvas_size.0 == 0 || self.canvas_size.1 == 0 {
            return Err(GridError::InvalidConfiguration(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_size.0, self.canvas_size.1
            ))
            .into());
        }
        Ok(())
    }

    pub fn build_grid(&self) -> Result<GridModel, ConfigError> {
        self.validate()?;
        Ok(GridModel::build(
            self.dimension,
            self.cell_size,
            self.canvas_size_f32(),
            self.seed,
        )?)
    }

    /// Capture a grid's shape and seed, so the scene rebuilds identically
    pub fn from_grid(grid: &GridModel, kind: DistortionKind, strength: f32) -> Self {
        let (w, h) = grid.canvas_size();
        Self {
            dimension: grid.dimension(),
            cell_size: grid.cell_size(),
            canvas_size: (w.round() as u32, h.round() as u32),
            distortion_type: kind,
            distortion_strength: strength,
            seed: Some(grid.seed()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded scene from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved scene to {}", path.display());
        Ok(())
    }
}
