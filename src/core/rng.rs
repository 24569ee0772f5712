//! RNG and cell factory
//!
//! A simple seedable LCG keeps every run reproducible: the cube spawn
//! factory and the power-up roll both draw from injected `SimpleRng`
//! instances instead of a global random source.

use crate::core::cell::CellData;
use crate::types::{CubeColor, ObstacleKind, Position, PowerUpKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Creates cells for grid init and top-row refills. Color eligibility is
/// policy: the factory only ever spawns from the first `color_count`
/// entries of [`CubeColor::ALL`].
#[derive(Debug, Clone)]
pub struct CellFactory {
    color_count: u8,
    rng: SimpleRng,
}

impl CellFactory {
    pub fn new(color_count: u8, seed: u32) -> Self {
        Self {
            color_count: color_count.clamp(1, CubeColor::ALL.len() as u8),
            rng: SimpleRng::new(seed),
        }
    }

    /// Random cube from the configured palette
    pub fn create_random_cube(&mut self, position: Position) -> CellData {
        let index = self.rng.next_range(u32::from(self.color_count)) as usize;
        CellData::cube(CubeColor::ALL[index], position)
    }

    pub fn create_cube(&self, color: CubeColor, position: Position) -> CellData {
        CellData::cube(color, position)
    }

    /// Obstacle with the kind's default health
    pub fn create_obstacle(&self, kind: ObstacleKind, position: Position) -> CellData {
        CellData::obstacle(kind, kind.default_health(), position)
    }

    pub fn create_power_up(&self, kind: PowerUpKind, position: Position) -> CellData {
        CellData::power_up(kind, position)
    }
}
