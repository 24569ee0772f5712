//! Core types shared across the simulation
//! Pure data types with no dependency on the grid or the engine

use serde::{Deserialize, Serialize};

/// Default grid dimensions
pub const DEFAULT_WIDTH: i32 = 8;
pub const DEFAULT_VISIBLE_HEIGHT: i32 = 8;
pub const DEFAULT_SPAWN_ROWS: i32 = 1;

/// Default physics parameters (cell sizes per second / per second squared)
pub const DEFAULT_CELL_SIZE: f32 = 1.0;
pub const DEFAULT_GRAVITY: f32 = 20.0;
pub const DEFAULT_MAX_VELOCITY: f32 = 25.0;

/// Pacing delay between chained check-above steps, in seconds.
/// A deliberate visual throttle, not physically derived.
pub const DEFAULT_CASCADE_DELAY: f32 = 0.02;

/// Minimum connected region size that counts as a match
pub const DEFAULT_MIN_MATCH_COUNT: usize = 2;

/// Number of cube colors eligible for random spawns
pub const DEFAULT_COLOR_COUNT: u8 = 4;

/// Fallback fall duration when the kinematics are degenerate
/// (non-positive discriminant); a fall must always make progress.
pub const MIN_FALL_DURATION: f32 = 0.1;

/// Grid coordinates. `x` grows rightwards, `y` grows upwards;
/// row 0 is the bottom of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one row above
    pub const fn above(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// Position one row below
    pub const fn below(self) -> Self {
        Self::new(self.x, self.y - 1)
    }
}

/// Cube colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CubeColor {
    /// All colors, in spawn-index order
    pub const ALL: [CubeColor; 4] = [
        CubeColor::Red,
        CubeColor::Green,
        CubeColor::Blue,
        CubeColor::Yellow,
    ];
}

/// Breakable obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Rock,
    Ice,
    Chain,
}

impl ObstacleKind {
    /// Starting health when placed without an explicit override
    pub const fn default_health(self) -> u8 {
        match self {
            ObstacleKind::Rock => 1,
            ObstacleKind::Ice => 2,
            ObstacleKind::Chain => 3,
        }
    }
}

/// Power-up kinds. Only *creation* is simulated; activation effects are
/// resolved outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    RowRocket,
    ColumnRocket,
    Bomb,
}

/// Per-cell lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Idle,
    Falling,
    Matched,
    Disabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_neighbors() {
        let p = Position::new(3, 5);
        assert_eq!(p.above(), Position::new(3, 6));
        assert_eq!(p.below(), Position::new(3, 4));
    }

    #[test]
    fn obstacle_default_health_is_positive() {
        for kind in [ObstacleKind::Rock, ObstacleKind::Ice, ObstacleKind::Chain] {
            assert!(kind.default_health() > 0);
        }
    }
}
