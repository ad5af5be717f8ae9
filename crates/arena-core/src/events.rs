//! Events emitted by the simulation for host, audio, and UI feedback.
//!
//! Events are fire-and-forget: the simulation buffers them during a tick and
//! dispatches them once at the end of it.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{DVec2, MobId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A mob joined the live population.
    MobSpawned {
        mob: MobId,
        kind: BehaviorKind,
        position: DVec2,
    },
    /// A mob lost health.
    MobDamaged {
        mob: MobId,
        amount: f64,
        position: DVec2,
    },
    /// A mob was removed after its health reached zero. Emitted exactly once
    /// per mob.
    MobKilled {
        mob: MobId,
        kind: BehaviorKind,
        base_reward: u32,
        /// Payout after the combo multiplier (floored).
        reward: u32,
        /// `reward - base_reward`.
        bonus: u32,
        /// Where the killing blow landed.
        position: DVec2,
    },
    /// The player lost health.
    PlayerDamaged {
        amount: f64,
        remaining: f64,
        /// Mob whose contact or projectile dealt the damage, if any.
        source: Option<MobId>,
    },
    /// Player health reached zero. Emitted once per life.
    PlayerKilled,
    /// Streak or multiplier changed (kill or timeout).
    ComboChanged { streak: u32, multiplier: f64 },
    /// An area effect went off.
    AreaEffect {
        kind: AreaEffectKind,
        position: DVec2,
        radius: f64,
    },
}
