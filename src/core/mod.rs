//! Core module - pure simulation logic with no I/O dependencies
//!
//! Leaves first: cells and the grid hold state, the resolvers are pure
//! queries, the cascade engine owns the temporal bookkeeping, and the
//! grid engine orchestrates a full click resolution.

pub mod cascade;
pub mod cell;
pub mod damage;
pub mod engine;
pub mod grid;
pub mod match_finder;
pub mod physics;
pub mod powerup;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use cascade::CascadeEngine;
pub use cell::{CellData, CellKind};
pub use engine::GridEngine;
pub use grid::Grid;
pub use match_finder::MatchFinder;
pub use physics::FallPhysics;
pub use rng::{CellFactory, SimpleRng};
pub use snapshot::GridSnapshot;
