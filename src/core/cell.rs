//! Cell data - the value stored in one grid slot
//!
//! Cells are plain values: every read hands out a copy and every mutation
//! replaces the slot through the grid's setters. A single tagged `CellKind`
//! replaces the source-style class hierarchy, so a cell can never be a cube
//! and an obstacle at the same time.

use serde::{Deserialize, Serialize};

use crate::types::{CellState, CubeColor, ObstacleKind, Position, PowerUpKind};

/// What occupies a grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellKind {
    Empty,
    Cube { color: CubeColor },
    Obstacle { obstacle: ObstacleKind },
    PowerUp { power_up: PowerUpKind },
}

/// One grid slot: kind, position, lifecycle state, fall policy, health.
///
/// `position` always equals the slot's grid index; `Grid::set` rewrites it
/// on every write so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub kind: CellKind,
    pub position: Position,
    pub state: CellState,
    pub can_fall: bool,
    pub health: u8,
}

impl CellData {
    pub fn empty(position: Position) -> Self {
        Self {
            kind: CellKind::Empty,
            position,
            state: CellState::Idle,
            can_fall: false,
            health: 0,
        }
    }

    pub fn cube(color: CubeColor, position: Position) -> Self {
        Self {
            kind: CellKind::Cube { color },
            position,
            state: CellState::Idle,
            can_fall: true,
            health: 1,
        }
    }

    pub fn obstacle(kind: ObstacleKind, health: u8, position: Position) -> Self {
        Self {
            kind: CellKind::Obstacle { obstacle: kind },
            position,
            state: CellState::Idle,
            can_fall: false,
            health,
        }
    }

    pub fn power_up(kind: PowerUpKind, position: Position) -> Self {
        Self {
            kind: CellKind::PowerUp { power_up: kind },
            position,
            state: CellState::Idle,
            can_fall: true,
            health: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    pub fn is_cube(&self) -> bool {
        matches!(self.kind, CellKind::Cube { .. })
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, CellKind::Obstacle { .. })
    }

    pub fn is_power_up(&self) -> bool {
        matches!(self.kind, CellKind::PowerUp { .. })
    }

    pub fn cube_color(&self) -> Option<CubeColor> {
        match self.kind {
            CellKind::Cube { color } => Some(color),
            _ => None,
        }
    }

    /// Obstacle with health left; only these take splash damage
    pub fn is_breakable(&self) -> bool {
        self.is_obstacle() && self.health > 0
    }

    /// Only idle cubes participate in color flood fill
    pub fn can_match(&self) -> bool {
        self.is_cube() && self.state == CellState::Idle
    }

    /// Clickable by the player: idle cube or power-up in the visible area
    pub fn can_click(&self) -> bool {
        self.state == CellState::Idle && (self.is_cube() || self.is_power_up())
    }

    pub fn with_state(self, state: CellState) -> Self {
        Self { state, ..self }
    }

    pub fn with_can_fall(self, can_fall: bool) -> Self {
        Self { can_fall, ..self }
    }

    /// Reduce health, saturating at zero. The caller decides what a
    /// destroyed (health 0) cell turns into.
    pub fn take_damage(self, amount: u8) -> Self {
        Self {
            health: self.health.saturating_sub(amount),
            ..self
        }
    }
}
