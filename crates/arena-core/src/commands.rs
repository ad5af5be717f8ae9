//! Host commands sent to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, so host input
//! never mutates the mob collection mid-iteration.

use serde::{Deserialize, Serialize};

use crate::types::MobId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    // --- Player ---
    /// Move the player's top-left corner (clamped to the arena).
    MovePlayer { x: f64, y: f64 },
    /// Player attack against a single mob.
    StrikeMob { mob: MobId, amount: f64 },
    /// Player attack against every mob within `radius` of `(x, y)`,
    /// falling off linearly to zero at the edge.
    StrikeArea {
        x: f64,
        y: f64,
        radius: f64,
        damage: f64,
    },
    /// Restore a dead player to full health.
    RevivePlayer,

    // --- Population ---
    /// Change the number of mobs the population manager maintains.
    SetTargetPopulation { count: usize },

    // --- Session control ---
    Pause,
    Resume,
    /// Clear all entities and combo state and restart the clock.
    Reset,
}
