//! Splash damage - obstacles adjacent to a matched region
//!
//! Adjacency is measured from the matched positions against the board as
//! it stood before the match was cleared. An obstacle next to several
//! matched cells is still damaged exactly once per resolution pass.

use std::collections::HashSet;

use crate::core::grid::Grid;
use crate::types::Position;

/// What one damage pass did to the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageOutcome {
    /// Damaged but still standing: position and remaining health
    pub damaged: Vec<(Position, u8)>,
    /// Health reached zero; slots already cleared to empty
    pub destroyed: Vec<Position>,
}

/// Breakable obstacles orthogonally adjacent to any cell of `region`,
/// deduplicated and in deterministic order.
pub fn affected_obstacles(grid: &Grid, region: &[Position]) -> Vec<Position> {
    let mut seen = HashSet::new();
    let mut affected = Vec::new();
    for pos in region {
        for neighbor in grid.orthogonal_neighbors(pos.x, pos.y) {
            if !seen.insert(neighbor) {
                continue;
            }
            if grid.cell_or_empty(neighbor.x, neighbor.y).is_breakable() {
                affected.push(neighbor);
            }
        }
    }
    affected
}

/// Apply one point of damage to each position. Obstacles that reach zero
/// health are cleared to empty and reported destroyed; survivors keep
/// their reduced health and stay in place.
pub fn apply_damage(grid: &mut Grid, positions: &[Position]) -> DamageOutcome {
    let mut outcome = DamageOutcome::default();
    for &pos in positions {
        let cell = grid.cell_or_empty(pos.x, pos.y);
        if !cell.is_breakable() {
            continue;
        }
        let damaged = cell.take_damage(1);
        if damaged.health == 0 {
            grid.clear(pos.x, pos.y);
            outcome.destroyed.push(pos);
        } else {
            grid.set(pos.x, pos.y, damaged);
            outcome.damaged.push((pos, damaged.health));
        }
    }
    outcome
}
