//! Cascade engine - gravity resolution and top-row refill
//!
//! The only component with temporal state. Three kinds of pending work:
//!
//! - delayed check-above continuations (the cascade pacing throttle,
//!   driven by `tick`),
//! - move completions keyed by destination, resumed when the presentation
//!   layer reports a fall animation finished,
//! - power-up creation windows, resumed when the creation animation
//!   settles.
//!
//! Simulation state updates synchronously when a fall starts; the pending
//! completion only gates the *next* decision for that cell (can it fall
//! further). Completions for unknown positions are ignored, which makes
//! stale callbacks after `cancel_pending` harmless.

use std::collections::{HashMap, HashSet};

use crate::core::grid::Grid;
use crate::core::physics::FallPhysics;
use crate::core::rng::CellFactory;
use crate::events::GridEvent;
use crate::types::{CellState, Position};

#[derive(Debug, Clone)]
struct DelayedCheck {
    pos: Position,
    remaining: f32,
}

#[derive(Debug, Clone)]
pub struct CascadeEngine {
    physics: FallPhysics,
    cascade_delay: f32,
    /// Per-cell fall velocity, present only while that cell is falling
    velocities: HashMap<Position, f32>,
    pending_checks: Vec<DelayedCheck>,
    /// Fall destinations awaiting a move-complete report
    pending_moves: HashSet<Position>,
    /// Power-up origins awaiting their creation window to settle
    pending_creations: HashSet<Position>,
}

impl CascadeEngine {
    pub fn new(physics: FallPhysics, cascade_delay: f32) -> Self {
        Self {
            physics,
            cascade_delay,
            velocities: HashMap::new(),
            pending_checks: Vec::new(),
            pending_moves: HashSet::new(),
            pending_creations: HashSet::new(),
        }
    }

    /// No pending checks, in-flight falls, or creation windows
    pub fn is_settled(&self) -> bool {
        self.pending_checks.is_empty()
            && self.pending_moves.is_empty()
            && self.pending_creations.is_empty()
    }

    /// Drop all pending continuations (level restart hardening). Late
    /// completion reports for the old cascade become no-ops.
    pub fn cancel_pending(&mut self) {
        self.velocities.clear();
        self.pending_checks.clear();
        self.pending_moves.clear();
        self.pending_creations.clear();
    }

    /// Inspect the slot at (x, y) for a chain reaction.
    ///
    /// A non-empty fallable idle cell over an empty slot begins a fall.
    /// An empty slot in the topmost spawn row is lazily refilled with a
    /// random cube, which then begins its own fall if it can.
    pub fn check_above(
        &mut self,
        grid: &mut Grid,
        factory: &mut CellFactory,
        events: &mut Vec<GridEvent>,
        x: i32,
        y: i32,
    ) {
        if !grid.is_valid(x, y) {
            return;
        }
        let cell = grid.cell_or_empty(x, y);
        if !cell.is_empty() {
            if cell.can_fall && cell.state == CellState::Idle && grid.is_empty_at(x, y - 1) {
                self.fall_one_step(grid, events, x, y);
            }
        } else if y == grid.top_spawn_row() {
            let spawned = factory.create_random_cube(Position::new(x, y));
            grid.set(x, y, spawned);
            events.push(GridEvent::CellCreated {
                pos: Position::new(x, y),
                cell: grid.cell_or_empty(x, y),
            });
            if grid.is_empty_at(x, y - 1) {
                self.fall_one_step(grid, events, x, y);
            }
        }
    }

    /// Move the cell at (x, y) one row down. The grid reflects the new
    /// position immediately; the emitted `CellMoved` carries the timing
    /// profile for the external animator, and the vacated slot's upstairs
    /// neighbor is re-checked after the pacing delay.
    fn fall_one_step(&mut self, grid: &mut Grid, events: &mut Vec<GridEvent>, x: i32, y: i32) {
        let from = Position::new(x, y);
        let to = from.below();
        // Only fall into a slot that is empty at decision time.
        if !grid.is_valid(to.x, to.y) || !grid.is_empty_at(to.x, to.y) {
            return;
        }
        let cell = grid.cell_or_empty(x, y);
        if cell.is_empty() || !cell.can_fall {
            return;
        }

        let entry_velocity = self.velocities.remove(&from).unwrap_or(0.0);
        let duration = self.physics.fall_duration(entry_velocity);
        let exit_velocity = self.physics.exit_velocity(entry_velocity, duration);

        grid.set(to.x, to.y, cell.with_state(CellState::Falling));
        grid.clear(from.x, from.y);
        self.velocities.insert(to, exit_velocity);
        self.pending_moves.insert(to);

        events.push(GridEvent::CellMoved {
            from,
            to,
            duration,
            entry_velocity,
            gravity: self.physics.gravity(),
        });

        if grid.is_valid(x, y + 1) {
            self.schedule_check(from.above());
        }
    }

    fn schedule_check(&mut self, pos: Position) {
        self.pending_checks.push(DelayedCheck {
            pos,
            remaining: self.cascade_delay,
        });
    }

    /// Advance the pacing timer and fire due check-above continuations in
    /// the order they were scheduled.
    pub fn tick(
        &mut self,
        grid: &mut Grid,
        factory: &mut CellFactory,
        events: &mut Vec<GridEvent>,
        dt: f32,
    ) {
        if self.pending_checks.is_empty() {
            return;
        }
        let mut due = Vec::new();
        for check in &mut self.pending_checks {
            check.remaining -= dt;
        }
        self.pending_checks.retain(|check| {
            if check.remaining <= 0.0 {
                due.push(check.pos);
                false
            } else {
                true
            }
        });
        for pos in due {
            self.check_above(grid, factory, events, pos.x, pos.y);
        }
    }

    /// Presentation layer reports a fall animation finished at (x, y).
    /// If the cell can still fall it chains another step with the carried
    /// exit velocity; otherwise it idles and its velocity entry is
    /// dropped. Returns false for unknown (stale) positions.
    pub fn on_move_complete(
        &mut self,
        grid: &mut Grid,
        events: &mut Vec<GridEvent>,
        x: i32,
        y: i32,
    ) -> bool {
        let pos = Position::new(x, y);
        if !self.pending_moves.remove(&pos) {
            return false;
        }
        let cell = grid.cell_or_empty(x, y);
        if !cell.is_empty() && cell.can_fall && grid.is_empty_at(x, y - 1) {
            self.fall_one_step(grid, events, x, y);
        } else {
            grid.set_state(x, y, CellState::Idle);
            self.velocities.remove(&pos);
        }
        true
    }

    /// Register a freshly created power-up's settle window
    pub fn begin_power_up_creation(&mut self, pos: Position) {
        self.pending_creations.insert(pos);
    }

    /// Presentation layer reports a power-up creation animation finished.
    /// The cell becomes fallable again and immediately joins the cascade
    /// if the slot below it is empty.
    pub fn on_power_up_settled(
        &mut self,
        grid: &mut Grid,
        events: &mut Vec<GridEvent>,
        x: i32,
        y: i32,
    ) -> bool {
        let pos = Position::new(x, y);
        if !self.pending_creations.remove(&pos) {
            return false;
        }
        let cell = grid.cell_or_empty(x, y);
        if cell.is_power_up() {
            grid.set_can_fall(x, y, true);
            grid.set_state(x, y, CellState::Idle);
            if grid.is_empty_at(x, y - 1) {
                self.fall_one_step(grid, events, x, y);
            }
        }
        true
    }

    /// Destinations currently awaiting a move-complete report, in
    /// deterministic order (for headless driving)
    pub fn pending_move_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.pending_moves.iter().copied().collect();
        positions.sort();
        positions
    }

    /// Power-up origins currently inside their creation window
    pub fn pending_creation_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.pending_creations.iter().copied().collect();
        positions.sort();
        positions
    }

    #[cfg(test)]
    pub fn velocity_at(&self, pos: Position) -> Option<f32> {
        self.velocities.get(&pos).copied()
    }
}
