//! Snapshot system: reads the world and builds a complete `ArenaSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use arena_core::components::*;
use arena_core::enums::SessionPhase;
use arena_core::events::SimEvent;
use arena_core::state::*;
use arena_core::types::SimTime;

use crate::population::{mob_id, Roster};

/// Build a complete snapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    roster: &Roster,
    player: &Player,
    time: &SimTime,
    phase: SessionPhase,
    combo: ComboStats,
    stats: &SessionStats,
    events: Vec<SimEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        player: build_player(player),
        mobs: build_mobs(world, roster),
        combo,
        stats: stats.clone(),
        events,
    }
}

pub fn build_player(player: &Player) -> PlayerView {
    PlayerView {
        position: player.body.position,
        size: player.body.size,
        health: player.health.current,
        max_health: player.health.max,
        alive: player.alive,
        damage_dealt: player.damage_dealt,
    }
}

/// Records for every live (non-depleted) mob, in roster order.
pub fn build_mobs(world: &World, roster: &Roster) -> Vec<MobRecord> {
    roster
        .as_slice()
        .iter()
        .filter_map(|&entity| build_mob(world, entity))
        .collect()
}

/// Record for one live mob; `None` for missing or depleted entities.
pub fn build_mob(world: &World, entity: Entity) -> Option<MobRecord> {
    let mut query = world
        .query_one::<(&Body, &Health, &Mob, &Volley)>(entity)
        .ok()?;
    let (body, health, mob, volley) = query.get()?;
    if health.is_depleted() {
        return None;
    }
    Some(MobRecord {
        id: mob_id(entity),
        profile: mob.profile.clone(),
        kind: mob.kind(),
        position: body.position,
        size: body.size,
        health: health.current,
        max_health: health.max,
        reward: mob.reward,
        cooldown_ms: mob.cooldown_ms,
        projectiles: volley.projectiles.clone(),
    })
}
