//! Read-only grid snapshot for the presentation layer
//!
//! The presentation layer never holds references into the grid; it maps
//! positions to its own renderable handles and queries state through
//! copies like this one.

use serde::{Deserialize, Serialize};

use crate::core::cell::CellData;
use crate::core::grid::Grid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub visible_height: i32,
    pub total_height: i32,
    /// Row-major, bottom row first (index = y * width + x)
    pub cells: Vec<CellData>,
    /// True while a resolution is in flight; input should stay gated
    pub resolving: bool,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid, resolving: bool) -> Self {
        Self {
            width: grid.width(),
            visible_height: grid.visible_height(),
            total_height: grid.total_height(),
            cells: grid.iter().copied().collect(),
            resolving,
        }
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&CellData> {
        if x < 0 || x >= self.width || y < 0 || y >= self.total_height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }

    pub fn playable(&self) -> bool {
        !self.resolving
    }
}
