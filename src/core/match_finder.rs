//! Match finder - flood fill over connected same-color cube regions
//!
//! Pure query against a grid snapshot: no side effects, identical results
//! for identical grids. Only idle cubes participate; obstacles, power-ups,
//! and falling cells block the fill.

use crate::core::grid::Grid;
use crate::types::Position;

#[derive(Debug, Clone)]
pub struct MatchFinder {
    min_match_count: usize,
}

impl MatchFinder {
    pub fn new(min_match_count: usize) -> Self {
        Self { min_match_count }
    }

    /// Connected region of idle cubes sharing the seed's color, seed first.
    /// Empty when the seed is out of bounds, not an idle cube, or the
    /// region is smaller than `min_match_count`.
    pub fn find_matches(&self, grid: &Grid, seed_x: i32, seed_y: i32) -> Vec<Position> {
        let Some(seed) = grid.cell(seed_x, seed_y) else {
            return Vec::new();
        };
        if !seed.can_match() {
            return Vec::new();
        }
        let color = match seed.cube_color() {
            Some(color) => color,
            None => return Vec::new(),
        };

        let mut visited = vec![false; (grid.width() * grid.total_height()) as usize];
        let mark = |visited: &mut [bool], pos: Position, width: i32| {
            visited[(pos.y * width + pos.x) as usize] = true;
        };
        let seen = |visited: &[bool], pos: Position, width: i32| {
            visited[(pos.y * width + pos.x) as usize]
        };

        let width = grid.width();
        let start = Position::new(seed_x, seed_y);
        let mut matches = vec![start];
        let mut stack = vec![start];
        mark(&mut visited, start, width);

        while let Some(pos) = stack.pop() {
            for neighbor in grid.orthogonal_neighbors(pos.x, pos.y) {
                if seen(&visited, neighbor, width) {
                    continue;
                }
                let cell = grid.cell_or_empty(neighbor.x, neighbor.y);
                if cell.can_match() && cell.cube_color() == Some(color) {
                    mark(&mut visited, neighbor, width);
                    matches.push(neighbor);
                    stack.push(neighbor);
                }
            }
        }

        if matches.len() < self.min_match_count {
            return Vec::new();
        }
        matches
    }

    pub fn has_match_at(&self, grid: &Grid, x: i32, y: i32) -> bool {
        !self.find_matches(grid, x, y).is_empty()
    }
}
