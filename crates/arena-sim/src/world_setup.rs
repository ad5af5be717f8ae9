//! Entity spawn factories for the arena world.
//!
//! Creates mob entities with the full component bundle, either fresh from a
//! profile or rebuilt from an exported record.

use hecs::{Entity, World};

use arena_core::components::*;
use arena_core::config::MobProfile;
use arena_core::constants::MIN_PROJECTILE_SPEED;
use arena_core::geometry::{clamp_to_bounds, normalize};
use arena_core::state::MobRecord;
use arena_core::types::{DVec2, WorldBounds};

use crate::population::mob_id;

/// Spawn a mob at full health with its top-left corner at `position`.
///
/// The attack cooldown starts at a full interval so a fresh spawn cannot
/// strike on its first tick.
pub fn spawn_mob(world: &mut World, profile: &MobProfile, position: DVec2) -> Entity {
    let mob = Mob {
        profile: profile.name.clone(),
        behavior: profile.behavior,
        speed: profile.speed,
        contact_damage: profile.contact_damage,
        reward: profile.reward,
        attack_interval_ms: profile.attack_interval_ms,
        cooldown_ms: profile.attack_interval_ms,
        last_hit: None,
    };

    world.spawn((
        Body {
            position,
            size: profile.size,
        },
        Health::full(profile.max_health),
        mob,
        Strafe::default(),
        Volley::default(),
    ))
}

/// Rebuild a mob from an exported record.
///
/// Stats come from `profile`; the record supplies position, health,
/// cooldown, and in-flight projectiles, each clamped into range. Records
/// with a non-finite position or no health left are rejected.
pub fn restore_mob(
    world: &mut World,
    profile: &MobProfile,
    record: &MobRecord,
    bounds: &WorldBounds,
) -> Option<Entity> {
    if !record.position.is_finite() {
        return None;
    }
    let health = Health::at(record.health, profile.max_health);
    if health.is_depleted() {
        return None;
    }

    let position = clamp_to_bounds(record.position, profile.size, bounds);
    let entity = spawn_mob(world, profile, position);
    let owner = mob_id(entity);

    if let Ok((stored_health, mob, volley)) =
        world.query_one_mut::<(&mut Health, &mut Mob, &mut Volley)>(entity)
    {
        *stored_health = health;
        mob.cooldown_ms = if record.cooldown_ms.is_finite() {
            record.cooldown_ms.clamp(0.0, profile.attack_interval_ms)
        } else {
            profile.attack_interval_ms
        };
        volley.projectiles = record
            .projectiles
            .iter()
            .filter(|p| {
                p.position.is_finite()
                    && p.direction.is_finite()
                    && p.speed.is_finite()
                    && p.damage.is_finite()
                    && bounds.contains(p.position)
            })
            .filter_map(|p| {
                let direction = normalize(p.direction.x, p.direction.y);
                (direction != DVec2::ZERO).then(|| Projectile {
                    direction,
                    speed: p.speed.max(MIN_PROJECTILE_SPEED),
                    damage: p.damage.max(0.0),
                    owner,
                    ..*p
                })
            })
            .collect();
    }

    Some(entity)
}
