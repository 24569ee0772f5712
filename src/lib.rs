//! tile-blast - deterministic simulation core for a tap-to-match puzzle
//!
//! Clicking a cube flood-fills its connected same-color region, removes
//! it (or condenses it into a power-up), splashes damage onto adjacent
//! breakable obstacles, and cascades gravity until the grid is stable,
//! refilling columns lazily from off-screen spawn rows.
//!
//! The crate is presentation-free: integrators drain [`events::GridEvent`]s,
//! animate them, and report fall completions back through
//! [`core::GridEngine::report_move_complete`]. Headless integrations can
//! use [`core::GridEngine::run_to_rest`] instead.

pub mod config;
pub mod core;
pub mod events;
pub mod types;

pub use config::{ConfigError, GridConfig};
pub use core::{CellData, CellKind, GridEngine, GridSnapshot};
pub use events::GridEvent;
pub use types::{CellState, CubeColor, ObstacleKind, Position, PowerUpKind};
