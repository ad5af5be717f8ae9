//! Per-tick mob intent.
//!
//! Pure functions that decide where a mob moves and whether it attacks this
//! tick, dispatched on the behavior profile. No entity-store dependency;
//! the simulation copies the relevant component data into a `MobContext`
//! and applies the returned `Intent`.

use arena_core::components::Body;
use arena_core::config::{BehaviorProfile, RangedParams};
use arena_core::enums::KiteStance;
use arena_core::geometry::{clamp_to_bounds, direction, distance};
use arena_core::types::{DVec2, WorldBounds};
use rand::Rng;

use crate::strafe::next_strafe;

/// Kiters flee inside this fraction of their range.
pub const KITE_FLEE_FRACTION: f64 = 0.5;

/// Kiters pursue beyond this fraction of their range.
pub const KITE_PURSUE_FRACTION: f64 = 0.8;

/// Input to the intent function for a single mob.
#[derive(Debug, Clone, Copy)]
pub struct MobContext {
    pub body: Body,
    pub behavior: BehaviorProfile,
    /// Units per second.
    pub speed: f64,
    /// Remaining attack cooldown, already decremented for this tick.
    pub cooldown_ms: f64,
    /// Strafe direction held from the previous tick.
    pub strafe: DVec2,
}

/// The player as seen by mobs. `None` is passed for a dead player.
#[derive(Debug, Clone, Copy)]
pub struct PlayerContext {
    pub body: Body,
}

/// Attack chosen this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackDecision {
    Hold,
    /// Melee contact: the moved mob overlaps the player.
    Contact,
    /// Launch a projectile from `origin` (top-left) along `direction`.
    Fire { origin: DVec2, direction: DVec2 },
}

/// Output of the intent function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Unit movement direction, or zero.
    pub direction: DVec2,
    /// New top-left position, finite and inside the arena.
    pub position: DVec2,
    pub attack: AttackDecision,
    /// Strafe direction to hold into the next tick.
    pub strafe: DVec2,
    /// Kite sub-state, for ranged mobs with a live target. Diagnostic only:
    /// the engine acts on `position`, `strafe`, and `attack`.
    pub stance: Option<KiteStance>,
}

impl Intent {
    /// Stand still and hold fire.
    fn idle(mob: &MobContext, bounds: &WorldBounds) -> Self {
        Self {
            direction: DVec2::ZERO,
            position: step_position(mob.body.position, DVec2::ZERO, 0.0, 0.0, mob.body.size, bounds),
            attack: AttackDecision::Hold,
            strafe: mob.strafe,
            stance: None,
        }
    }
}

/// Evaluate one mob for one tick.
pub fn compute_intent<R: Rng + ?Sized>(
    mob: &MobContext,
    player: Option<&PlayerContext>,
    bounds: &WorldBounds,
    elapsed_ms: f64,
    rng: &mut R,
) -> Intent {
    let Some(player) = player else {
        return Intent::idle(mob, bounds);
    };

    match mob.behavior {
        BehaviorProfile::MeleeAggressive => melee_intent(mob, player, bounds, elapsed_ms),
        BehaviorProfile::RangedKite(ref ranged) => {
            kite_intent(mob, ranged, player, bounds, elapsed_ms, rng)
        }
    }
}

fn melee_intent(
    mob: &MobContext,
    player: &PlayerContext,
    bounds: &WorldBounds,
    elapsed_ms: f64,
) -> Intent {
    let heading = direction(mob.body.center(), player.body.center());
    let position = step_position(
        mob.body.position,
        heading,
        mob.speed,
        elapsed_ms,
        mob.body.size,
        bounds,
    );

    let moved = Body {
        position,
        size: mob.body.size,
    };
    let attack = if mob.cooldown_ms <= 0.0 && moved.aabb().overlaps(&player.body.aabb()) {
        AttackDecision::Contact
    } else {
        AttackDecision::Hold
    };

    Intent {
        direction: heading,
        position,
        attack,
        strafe: DVec2::ZERO,
        stance: None,
    }
}

fn kite_intent<R: Rng + ?Sized>(
    mob: &MobContext,
    ranged: &RangedParams,
    player: &PlayerContext,
    bounds: &WorldBounds,
    elapsed_ms: f64,
    rng: &mut R,
) -> Intent {
    let mob_center = mob.body.center();
    let player_center = player.body.center();
    let toward = direction(mob_center, player_center);
    let d = distance(mob_center, player_center);

    let (stance, heading, strafe) = if d < ranged.range * KITE_FLEE_FRACTION {
        (KiteStance::Flee, -toward, DVec2::ZERO)
    } else if d > ranged.range * KITE_PURSUE_FRACTION {
        (KiteStance::Pursue, toward, DVec2::ZERO)
    } else {
        let held = next_strafe(mob.strafe, toward, ranged, rng);
        (KiteStance::Strafe, held, held)
    };

    let position = step_position(
        mob.body.position,
        heading,
        mob.speed,
        elapsed_ms,
        mob.body.size,
        bounds,
    );

    // Aim from where the mob ends up this tick.
    let attack = if mob.cooldown_ms <= 0.0 && d < ranged.range {
        let origin_center = position + mob.body.size * 0.5;
        let aim = direction(origin_center, player_center);
        if aim == DVec2::ZERO {
            AttackDecision::Hold
        } else {
            AttackDecision::Fire {
                origin: origin_center - ranged.projectile_size * 0.5,
                direction: aim,
            }
        }
    } else {
        AttackDecision::Hold
    };

    Intent {
        direction: heading,
        position,
        attack,
        strafe,
        stance: Some(stance),
    }
}

/// Advance a top-left position along `heading` and clamp it into the arena.
///
/// Any non-finite intermediate discards the move: the result is the previous
/// position (itself clamped), or the origin if even that is unusable.
pub fn step_position(
    position: DVec2,
    heading: DVec2,
    speed: f64,
    elapsed_ms: f64,
    size: DVec2,
    bounds: &WorldBounds,
) -> DVec2 {
    let fallback = if position.is_finite() {
        clamp_to_bounds(position, size, bounds)
    } else {
        DVec2::ZERO
    };

    let candidate = position + heading * speed * (elapsed_ms / 1000.0);
    if !heading.is_finite() || !candidate.is_finite() {
        return fallback;
    }

    let clamped = clamp_to_bounds(candidate, size, bounds);
    if clamped.is_finite() {
        clamped
    } else {
        fallback
    }
}
