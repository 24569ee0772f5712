//! Grid - the single source of truth for simulation state
//!
//! A flat width x total_height array of [`CellData`] in column-row order
//! (index = y * width + x). `total_height` includes the off-screen spawn
//! rows above the visible playfield. All reads return copies; all writes
//! go through the setters so the position-equals-index invariant is
//! enforced in one place.

use arrayvec::ArrayVec;

use crate::core::cell::CellData;
use crate::types::{CellState, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    visible_height: i32,
    total_height: i32,
    cells: Vec<CellData>,
}

impl Grid {
    /// Create an all-empty grid. Dimensions are assumed validated by
    /// [`GridConfig::validate`](crate::config::GridConfig::validate).
    pub fn new(width: i32, visible_height: i32, spawn_rows: i32) -> Self {
        let total_height = visible_height + spawn_rows;
        let mut cells = Vec::with_capacity((width * total_height) as usize);
        for y in 0..total_height {
            for x in 0..width {
                cells.push(CellData::empty(Position::new(x, y)));
            }
        }
        Self {
            width,
            visible_height,
            total_height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn visible_height(&self) -> i32 {
        self.visible_height
    }

    pub fn total_height(&self) -> i32 {
        self.total_height
    }

    /// Topmost spawn row; lazy refills happen only here
    pub fn top_spawn_row(&self) -> i32 {
        self.total_height - 1
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.total_height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Cell copy at (x, y); `None` when out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<CellData> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Cell copy at (x, y), with an empty sentinel for out-of-bounds reads
    pub fn cell_or_empty(&self, x: i32, y: i32) -> CellData {
        self.cell(x, y)
            .unwrap_or_else(|| CellData::empty(Position::new(x, y)))
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        matches!(self.cell(x, y), Some(cell) if cell.is_empty())
    }

    /// Write a cell at (x, y). The stored position is rewritten to match
    /// the slot, so a cell can never carry a stale position. Returns false
    /// for out-of-bounds writes.
    pub fn set(&mut self, x: i32, y: i32, mut cell: CellData) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                cell.position = Position::new(x, y);
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Replace the slot with an empty cell
    pub fn clear(&mut self, x: i32, y: i32) -> bool {
        self.set(x, y, CellData::empty(Position::new(x, y)))
    }

    pub fn set_state(&mut self, x: i32, y: i32, state: CellState) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx].state = state;
                true
            }
            None => false,
        }
    }

    pub fn set_can_fall(&mut self, x: i32, y: i32, can_fall: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx].can_fall = can_fall;
                true
            }
            None => false,
        }
    }

    /// In-bounds orthogonal neighbors of (x, y)
    pub fn orthogonal_neighbors(&self, x: i32, y: i32) -> ArrayVec<Position, 4> {
        let mut neighbors = ArrayVec::new();
        for (dx, dy) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
            let (nx, ny) = (x + dx, y + dy);
            if self.is_valid(nx, ny) {
                neighbors.push(Position::new(nx, ny));
            }
        }
        neighbors
    }

    /// Iterate over all cells, bottom row first
    pub fn iter(&self) -> impl Iterator<Item = &CellData> {
        self.cells.iter()
    }

    pub fn non_empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn falling_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.state == CellState::Falling)
            .count()
    }
}
