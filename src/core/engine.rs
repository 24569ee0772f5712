//! Grid engine - click orchestration over the simulation components
//!
//! Per interaction the engine goes Idle -> Resolving -> Idle. A click is
//! validated, flood-filled into a region, resolved into splash damage plus
//! either a power-up creation or a plain removal, and every vacated
//! position triggers a cascade check one row above it. The engine owns the
//! grid, the factory, the resolvers, and the event buffer; it is the only
//! writer.

use crate::config::{ConfigError, GridConfig};
use crate::core::cascade::CascadeEngine;
use crate::core::cell::CellData;
use crate::core::damage;
use crate::core::grid::Grid;
use crate::core::match_finder::MatchFinder;
use crate::core::physics::FallPhysics;
use crate::core::powerup;
use crate::core::rng::{CellFactory, SimpleRng};
use crate::core::snapshot::GridSnapshot;
use crate::events::GridEvent;
use crate::types::{CellState, Position};

/// Iteration guard for headless resolution; generous for any legal grid
const RUN_TO_REST_STEP_LIMIT: usize = 100_000;

#[derive(Debug, Clone)]
pub struct GridEngine {
    config: GridConfig,
    grid: Grid,
    factory: CellFactory,
    match_finder: MatchFinder,
    cascade: CascadeEngine,
    power_up_rng: SimpleRng,
    events: Vec<GridEvent>,
    resolving: bool,
}

impl GridEngine {
    /// Engine over an all-empty grid; callers place cells before play.
    /// The only fatal error in the crate is a malformed configuration.
    pub fn empty(config: GridConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.visible_height, config.spawn_rows);
        let physics = FallPhysics::from_config(&config);
        Ok(Self {
            grid,
            factory: CellFactory::new(config.color_count, seed),
            match_finder: MatchFinder::new(config.min_match_count),
            cascade: CascadeEngine::new(physics, config.cascade_delay),
            power_up_rng: SimpleRng::new(seed.wrapping_add(1)),
            events: Vec::new(),
            resolving: false,
            config,
        })
    }

    /// Engine with the visible playfield pre-filled with random cubes;
    /// spawn rows start empty. Emits a `CellCreated` per placed cell.
    pub fn new(config: GridConfig, seed: u32) -> Result<Self, ConfigError> {
        let mut engine = Self::empty(config, seed)?;
        for y in 0..engine.config.visible_height {
            for x in 0..engine.config.width {
                let cell = engine.factory.create_random_cube(Position::new(x, y));
                engine.grid.set(x, y, cell);
                engine.events.push(GridEvent::CellCreated {
                    pos: Position::new(x, y),
                    cell: engine.grid.cell_or_empty(x, y),
                });
            }
        }
        Ok(engine)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<CellData> {
        self.grid.cell(x, y)
    }

    /// True while a resolution (match + cascade) is in flight
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// Gating flag for the presentation layer's input handling
    pub fn input_enabled(&self) -> bool {
        !self.resolving
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid, self.resolving)
    }

    /// Hand over and clear the accumulated event buffer
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place a cell for level setup or tests. Rejected mid-resolution and
    /// out of bounds.
    pub fn place_cell(&mut self, x: i32, y: i32, cell: CellData) -> bool {
        if self.resolving {
            return false;
        }
        self.grid.set(x, y, cell)
    }

    /// Resolve a click at (x, y). Ignored while resolving, outside the
    /// visible area, on anything but an idle cube, or when the region is
    /// below the minimum match size. Power-up activation is not part of
    /// the core, so clicking a power-up is a no-op as well.
    pub fn handle_click(&mut self, x: i32, y: i32) {
        if self.resolving {
            return;
        }
        if y < 0 || y >= self.config.visible_height {
            return;
        }
        let Some(cell) = self.grid.cell(x, y) else {
            return;
        };
        if !cell.can_click() || !cell.is_cube() {
            return;
        }

        let matches = self.match_finder.find_matches(&self.grid, x, y);
        if matches.is_empty() {
            return;
        }

        // Splash damage is measured against the board as it stands now,
        // before the matched cells are cleared.
        let affected = damage::affected_obstacles(&self.grid, &matches);
        let outcome = damage::apply_damage(&mut self.grid, &affected);
        for &(pos, remaining_health) in &outcome.damaged {
            self.events.push(GridEvent::ObstacleDamaged {
                pos,
                remaining_health,
            });
        }
        for &pos in &outcome.destroyed {
            self.events.push(GridEvent::ObstacleDamaged {
                pos,
                remaining_health: 0,
            });
            self.events.push(GridEvent::CellRemoved { pos });
        }

        let mut vacated: Vec<Position> = Vec::new();
        match powerup::try_resolve(matches.len(), &mut self.power_up_rng) {
            Some(kind) => {
                // The seed position condenses into the power-up; every
                // other matched cell is destroyed like an ordinary match.
                let origin = matches[0];
                let absorbed = matches[1..].to_vec();
                for &pos in &absorbed {
                    self.remove_cell(pos);
                    vacated.push(pos);
                }
                // Non-fallable and disabled until the creation animation
                // settles; the cascade must not drop it early.
                let cell = self
                    .factory
                    .create_power_up(kind, origin)
                    .with_can_fall(false)
                    .with_state(CellState::Disabled);
                self.grid.set(origin.x, origin.y, cell);
                self.cascade.begin_power_up_creation(origin);
                self.events.push(GridEvent::PowerUpCreated {
                    origin,
                    kind,
                    absorbed,
                });
            }
            None => {
                for &pos in &matches {
                    self.remove_cell(pos);
                    vacated.push(pos);
                }
            }
        }
        vacated.extend(outcome.destroyed.iter().copied());

        self.resolving = true;
        for pos in vacated {
            self.cascade.check_above(
                &mut self.grid,
                &mut self.factory,
                &mut self.events,
                pos.x,
                pos.y + 1,
            );
        }
        self.emit_settled_if_done();
    }

    fn remove_cell(&mut self, pos: Position) {
        self.grid.clear(pos.x, pos.y);
        self.events.push(GridEvent::CellRemoved { pos });
    }

    /// Advance the cascade pacing timer by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.cascade
            .tick(&mut self.grid, &mut self.factory, &mut self.events, dt);
        self.emit_settled_if_done();
    }

    /// Presentation callback: the fall animation into (x, y) finished.
    /// Stale reports (after `cancel_pending`, or duplicates) are no-ops.
    pub fn report_move_complete(&mut self, x: i32, y: i32) {
        if self
            .cascade
            .on_move_complete(&mut self.grid, &mut self.events, x, y)
        {
            self.emit_settled_if_done();
        }
    }

    /// Presentation callback: the power-up creation animation at (x, y)
    /// finished; the cell becomes fallable again.
    pub fn report_power_up_settled(&mut self, x: i32, y: i32) {
        if self
            .cascade
            .on_power_up_settled(&mut self.grid, &mut self.events, x, y)
        {
            self.emit_settled_if_done();
        }
    }

    /// Invalidate every pending continuation (level restart). Cells left
    /// mid-fall are parked idle where the model already placed them.
    pub fn cancel_pending(&mut self) {
        for pos in self.cascade.pending_move_positions() {
            self.grid.set_state(pos.x, pos.y, CellState::Idle);
        }
        self.cascade.cancel_pending();
        self.resolving = false;
    }

    /// Headless resolution: drain pacing timers and synthesize move and
    /// creation completions until the grid is stable. For integrations
    /// without an animator (tests, the demo driver, server-side replay).
    pub fn run_to_rest(&mut self) {
        let step = self.config.cascade_delay.max(1e-3);
        let mut steps = 0;
        while self.resolving {
            steps += 1;
            if steps > RUN_TO_REST_STEP_LIMIT {
                break;
            }
            self.tick(step);
            for pos in self.cascade.pending_move_positions() {
                self.report_move_complete(pos.x, pos.y);
            }
            for pos in self.cascade.pending_creation_positions() {
                self.report_power_up_settled(pos.x, pos.y);
            }
        }
    }

    fn emit_settled_if_done(&mut self) {
        if self.resolving && self.cascade.is_settled() {
            self.resolving = false;
            self.events.push(GridEvent::CascadeSettled);
        }
    }
}
