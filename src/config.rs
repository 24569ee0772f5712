//! Grid configuration and construction-time validation
//!
//! A malformed configuration is the only fatal error in the crate:
//! everything downstream assumes positive dimensions and physics
//! parameters, so `validate` runs once when the engine is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    DEFAULT_CASCADE_DELAY, DEFAULT_CELL_SIZE, DEFAULT_COLOR_COUNT, DEFAULT_GRAVITY,
    DEFAULT_MAX_VELOCITY, DEFAULT_MIN_MATCH_COUNT, DEFAULT_SPAWN_ROWS, DEFAULT_VISIBLE_HEIGHT,
    DEFAULT_WIDTH,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive (width={width}, visible_height={visible_height})")]
    InvalidDimensions { width: i32, visible_height: i32 },
    #[error("at least one spawn row is required (spawn_rows={0})")]
    InvalidSpawnRows(i32),
    #[error("physics parameters must be positive (cell_size={cell_size}, gravity={gravity}, max_velocity={max_velocity})")]
    InvalidPhysics {
        cell_size: f32,
        gravity: f32,
        max_velocity: f32,
    },
    #[error("cascade delay must be non-negative ({0})")]
    InvalidCascadeDelay(f32),
    #[error("min_match_count must be at least 2 ({0})")]
    InvalidMinMatchCount(usize),
    #[error("color_count must be between 1 and 4 ({0})")]
    InvalidColorCount(u8),
}

/// Grid and simulation parameters, fixed at engine construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: i32,
    pub visible_height: i32,
    /// Off-screen buffer rows above the playfield; refills come from the
    /// topmost one.
    pub spawn_rows: i32,
    pub cell_size: f32,
    pub gravity: f32,
    pub max_velocity: f32,
    /// Seconds between chained check-above steps
    pub cascade_delay: f32,
    pub min_match_count: usize,
    pub color_count: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            visible_height: DEFAULT_VISIBLE_HEIGHT,
            spawn_rows: DEFAULT_SPAWN_ROWS,
            cell_size: DEFAULT_CELL_SIZE,
            gravity: DEFAULT_GRAVITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
            cascade_delay: DEFAULT_CASCADE_DELAY,
            min_match_count: DEFAULT_MIN_MATCH_COUNT,
            color_count: DEFAULT_COLOR_COUNT,
        }
    }
}

impl GridConfig {
    /// Total grid height including the off-screen spawn buffer
    pub fn total_height(&self) -> i32 {
        self.visible_height + self.spawn_rows
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.visible_height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                visible_height: self.visible_height,
            });
        }
        if self.spawn_rows < 1 {
            return Err(ConfigError::InvalidSpawnRows(self.spawn_rows));
        }
        if self.cell_size <= 0.0 || self.gravity <= 0.0 || self.max_velocity <= 0.0 {
            return Err(ConfigError::InvalidPhysics {
                cell_size: self.cell_size,
                gravity: self.gravity,
                max_velocity: self.max_velocity,
            });
        }
        if self.cascade_delay < 0.0 {
            return Err(ConfigError::InvalidCascadeDelay(self.cascade_delay));
        }
        if self.min_match_count < 2 {
            return Err(ConfigError::InvalidMinMatchCount(self.min_match_count));
        }
        if self.color_count < 1 || self.color_count > 4 {
            return Err(ConfigError::InvalidColorCount(self.color_count));
        }
        Ok(())
    }
}
