//! Population backfill: spawns mobs until the roster reaches its target.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use arena_core::config::ArenaConfig;
use arena_core::events::SimEvent;
use arena_core::geometry::clamp_to_bounds;
use arena_core::state::SessionStats;
use arena_core::types::DVec2;

use crate::population::{find_spawn_position, mob_id, pick_profile, Roster};
use crate::world_setup;

/// Spawn mobs until `roster.len() >= target`.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    roster: &mut Roster,
    config: &ArenaConfig,
    target: usize,
    player_center: DVec2,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    stats: &mut SessionStats,
) {
    while roster.len() < target {
        let Some(profile) = pick_profile(rng, &config.mobs).and_then(|i| config.mobs.get(i))
        else {
            return;
        };

        let search = find_spawn_position(rng, &config.world, &config.spawn, player_center);
        if !search.safe {
            tracing::debug!(
                attempts = search.attempts,
                "spawn search exhausted; using last sample"
            );
        }
        let position = clamp_to_bounds(
            search.point - profile.size * 0.5,
            profile.size,
            &config.world,
        );

        let entity = world_setup::spawn_mob(world, profile, position);
        roster.push(entity);
        stats.mobs_spawned += 1;

        let id = mob_id(entity);
        tracing::debug!(mob = %id, profile = %profile.name, "mob spawned");
        events.push(SimEvent::MobSpawned {
            mob: id,
            kind: profile.behavior.kind(),
            position,
        });
    }
}
