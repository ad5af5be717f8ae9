//! Snapshot and record types: the complete visible state handed to the host
//! after each tick, and the plain mob records an external save system can
//! round-trip.

use serde::{Deserialize, Serialize};

use crate::components::Projectile;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{DVec2, MobId, SimTime};

/// Complete state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub player: PlayerView,
    /// Live mobs in roster (spawn) order.
    pub mobs: Vec<MobRecord>,
    pub combo: ComboStats,
    pub stats: SessionStats,
    /// Events raised during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

/// Player position and status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub size: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub alive: bool,
    pub damage_dealt: f64,
}

/// Plain record of one mob's state.
///
/// `id` is informational on restore: restored mobs receive fresh handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobRecord {
    pub id: MobId,
    /// Profile name; stats are re-resolved from the mob table on restore.
    pub profile: String,
    pub kind: BehaviorKind,
    pub position: DVec2,
    pub size: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub reward: u32,
    pub cooldown_ms: f64,
    #[serde(default)]
    pub projectiles: Vec<Projectile>,
}

/// Combo engine readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboStats {
    pub streak: u32,
    pub peak: u32,
    pub multiplier: f64,
    /// Absolute time at which the streak lapses, if one is running.
    pub deadline_ms: Option<f64>,
}

impl Default for ComboStats {
    fn default() -> Self {
        Self {
            streak: 0,
            peak: 0,
            multiplier: 1.0,
            deadline_ms: None,
        }
    }
}

/// Running session counters for stat hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub kills: u32,
    pub total_reward: u64,
    pub total_bonus: u64,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub projectiles_fired: u32,
    pub pulses_triggered: u32,
    pub mobs_spawned: u32,
}
