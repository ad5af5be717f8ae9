//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

pub use glam::DVec2;

/// Simulation time tracking.
///
/// Unlike a fixed-rate clock, every tick advances by the (capped) delta the
/// host hands to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks that actually advanced the simulation.
    pub tick: u64,
    /// Simulated milliseconds since session start.
    pub now_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `elapsed_ms` (already sanitized by the caller).
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.tick += 1;
        self.now_ms += elapsed_ms;
    }
}

/// Immutable arena rectangle, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }.sanitized()
    }

    /// Non-finite or negative extents collapse to zero.
    pub fn sanitized(self) -> Self {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }

    /// Whether a point lies inside `[0, width] × [0, height]`.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: crate::constants::WORLD_WIDTH,
            height: crate::constants::WORLD_HEIGHT,
        }
    }
}

/// Stable, serializable handle for a mob.
///
/// Wraps the entity store's generational handle bits so that a handle to a
/// removed mob never aliases a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MobId(pub u64);

impl std::fmt::Display for MobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mob#{:x}", self.0)
    }
}
