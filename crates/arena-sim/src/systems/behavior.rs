//! Mob behavior system: movement, melee contact, projectile flight, firing.
//!
//! Calls the intent function from arena-behavior for each mob, then applies
//! the result to its components. Iterates the roster back-to-front and
//! never inserts or removes roster entries.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use arena_behavior::intent::{compute_intent, AttackDecision, MobContext, PlayerContext};
use arena_core::components::{Body, Health, Mob, Player, Projectile, Strafe, Volley};
use arena_core::config::BehaviorProfile;
use arena_core::events::SimEvent;
use arena_core::state::SessionStats;
use arena_core::types::WorldBounds;

use crate::combat;
use crate::population::{mob_id, Roster};
use crate::systems::projectiles;

/// Run one behavior pass over every live mob.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    roster: &Roster,
    player: &mut Player,
    bounds: &WorldBounds,
    elapsed_ms: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    stats: &mut SessionStats,
) {
    for &entity in roster.as_slice().iter().rev() {
        let Ok((body, health, mob, strafe, volley)) = world
            .query_one_mut::<(&mut Body, &Health, &mut Mob, &mut Strafe, &mut Volley)>(entity)
        else {
            continue;
        };
        // Depleted mobs wait for the death sweep.
        if health.is_depleted() {
            continue;
        }

        mob.cooldown_ms = (mob.cooldown_ms - elapsed_ms).max(0.0);

        let ctx = MobContext {
            body: *body,
            behavior: mob.behavior,
            speed: mob.speed,
            cooldown_ms: mob.cooldown_ms,
            strafe: strafe.direction,
        };
        let target = player.alive.then_some(PlayerContext { body: player.body });
        let intent = compute_intent(&ctx, target.as_ref(), bounds, elapsed_ms, rng);

        body.position = intent.position;
        strafe.direction = intent.strafe;

        // Shots already in flight move before a new one is added.
        projectiles::advance(volley, player, bounds, elapsed_ms, events, stats);

        let id = mob_id(entity);
        match intent.attack {
            AttackDecision::Hold => {}
            AttackDecision::Contact => {
                combat::damage_player(player, mob.contact_damage, Some(id), events, stats);
                mob.cooldown_ms = mob.attack_interval_ms;
            }
            AttackDecision::Fire { origin, direction } => {
                if let BehaviorProfile::RangedKite(ranged) = mob.behavior {
                    volley.projectiles.push(Projectile {
                        position: origin,
                        direction,
                        speed: ranged.projectile_speed,
                        damage: ranged.projectile_damage,
                        size: ranged.projectile_size,
                        owner: id,
                    });
                    stats.projectiles_fired += 1;
                }
                mob.cooldown_ms = mob.attack_interval_ms;
            }
        }
    }
}
