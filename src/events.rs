//! Outbound events consumed by the presentation layer
//!
//! The engine accumulates events during resolution; the integrator drains
//! them and reacts (spawn views, play removal effects, animate moves).
//! `CellMoved` carries the full timing profile so the external animator
//! can interpolate the fall and report completion back via
//! `GridEngine::report_move_complete`. The interface is in-process; the
//! serde derives exist so any remote exposure can use a structured
//! encoding such as JSON.

use serde::{Deserialize, Serialize};

use crate::core::cell::CellData;
use crate::types::{Position, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    /// A cell appeared (initial fill or lazy top-row refill)
    CellCreated { pos: Position, cell: CellData },
    /// A cell was destroyed and its slot is now empty
    CellRemoved { pos: Position },
    /// A cell moved one row down; the grid already reflects `to`
    CellMoved {
        from: Position,
        to: Position,
        duration: f32,
        entry_velocity: f32,
        gravity: f32,
    },
    /// A match condensed into a power-up at `origin`; `absorbed` cells
    /// were destroyed in the process
    PowerUpCreated {
        origin: Position,
        kind: PowerUpKind,
        absorbed: Vec<Position>,
    },
    /// An obstacle took splash damage; 0 remaining health means it was
    /// destroyed (a matching `CellRemoved` follows)
    ObstacleDamaged { pos: Position, remaining_health: u8 },
    /// The cascade finished; the grid is stable and input may be re-enabled
    CascadeSettled,
}
