//! Fall physics - closed-form kinematics for one-cell drops
//!
//! Models a single cell-height drop under constant gravity starting at an
//! entry velocity. The cascade engine chains these per row, feeding each
//! step's exit velocity into the next, which is what makes multi-row
//! falls accelerate.

use crate::config::GridConfig;
use crate::types::MIN_FALL_DURATION;

#[derive(Debug, Clone, Copy)]
pub struct FallPhysics {
    gravity: f32,
    cell_size: f32,
    max_velocity: f32,
}

impl FallPhysics {
    pub fn new(gravity: f32, cell_size: f32, max_velocity: f32) -> Self {
        Self {
            gravity,
            cell_size,
            max_velocity,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.gravity, config.cell_size, config.max_velocity)
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Time to fall one cell height entering at `entry_velocity`: the
    /// positive root of `0.5*g*t^2 + v*t - cell_size = 0`. A degenerate
    /// combination (no positive real root) returns a small fixed duration
    /// instead of failing, so a fall always makes progress.
    pub fn fall_duration(&self, entry_velocity: f32) -> f32 {
        let a = 0.5 * self.gravity;
        let b = entry_velocity;
        let c = -self.cell_size;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return MIN_FALL_DURATION;
        }
        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let t2 = (-b - sqrt_disc) / (2.0 * a);
        let t = t1.max(t2);
        if t > 0.0 {
            t
        } else {
            MIN_FALL_DURATION
        }
    }

    /// Velocity after falling for `duration`, clamped to the configured
    /// maximum.
    pub fn exit_velocity(&self, entry_velocity: f32, duration: f32) -> f32 {
        (entry_velocity + self.gravity * duration).min(self.max_velocity)
    }
}
