//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete category selecting a mob's per-tick movement and attack decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Chases the player and deals contact damage on overlap.
    MeleeAggressive,
    /// Holds a firing band around the player and shoots projectiles.
    RangedKite,
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Active,
    /// Ticks process commands only; no clock, movement, or combo decay.
    Paused,
}

/// Source of an area effect notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaEffectKind {
    /// Released by the combo engine on a streak milestone.
    ComboPulse,
    /// Player area strike issued by the host.
    PlayerStrike,
}

/// Ranged kite sub-state chosen this tick (diagnostic only, not persisted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KiteStance {
    Flee,
    Pursue,
    Strafe,
}
