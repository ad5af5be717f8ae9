//! Combat resolution: applying damage to mobs and the player.
//!
//! Damage never produces a kill event directly. A mob whose health reaches
//! zero stays in the roster until the death sweep removes it, which is the
//! single place `MobKilled` is emitted.

use hecs::{Entity, World};

use arena_core::components::{Body, Health, Mob, Player};
use arena_core::events::SimEvent;
use arena_core::state::SessionStats;
use arena_core::types::MobId;

use crate::population::mob_id;

/// Result of one damage application.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub dealt: f64,
    /// Health went from positive to zero on this call.
    pub lethal: bool,
}

/// Apply `amount` to `health`.
///
/// Non-finite or non-positive amounts and already-depleted targets are
/// no-ops. The removed amount never exceeds the remaining health, so
/// `0 <= current <= max` holds after every call.
pub fn apply_damage(health: &mut Health, amount: f64) -> DamageOutcome {
    if !amount.is_finite() || amount <= 0.0 || health.is_depleted() {
        return DamageOutcome::default();
    }
    let dealt = amount.min(health.current);
    health.current = (health.current - dealt).max(0.0);
    DamageOutcome {
        dealt,
        lethal: health.is_depleted(),
    }
}

/// Damage a mob, recording the hit position for its eventual kill event.
///
/// A missing entity (stale handle) is a no-op.
pub fn damage_mob(
    world: &mut World,
    entity: Entity,
    amount: f64,
    events: &mut Vec<SimEvent>,
) -> DamageOutcome {
    let Ok((body, health, mob)) = world.query_one_mut::<(&Body, &mut Health, &mut Mob)>(entity)
    else {
        return DamageOutcome::default();
    };

    let outcome = apply_damage(health, amount);
    if outcome.dealt > 0.0 {
        let position = body.center();
        mob.last_hit = Some(position);
        events.push(SimEvent::MobDamaged {
            mob: mob_id(entity),
            amount: outcome.dealt,
            position,
        });
    }
    outcome
}

/// Damage the player. A dead player takes no further damage.
pub fn damage_player(
    player: &mut Player,
    amount: f64,
    source: Option<MobId>,
    events: &mut Vec<SimEvent>,
    stats: &mut SessionStats,
) -> f64 {
    if !player.alive {
        return 0.0;
    }

    let outcome = apply_damage(&mut player.health, amount);
    if outcome.dealt > 0.0 {
        stats.damage_taken += outcome.dealt;
        events.push(SimEvent::PlayerDamaged {
            amount: outcome.dealt,
            remaining: player.health.current,
            source,
        });
    }
    if outcome.lethal {
        player.alive = false;
        tracing::debug!("player killed");
        events.push(SimEvent::PlayerKilled);
    }
    outcome.dealt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overkill_is_capped_at_remaining_health() {
        let mut health = Health::full(35.0);
        let outcome = apply_damage(&mut health, 40.0);
        assert_eq!(outcome.dealt, 35.0);
        assert!(outcome.lethal);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn invalid_amounts_are_no_ops() {
        let mut health = Health::full(10.0);
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(apply_damage(&mut health, amount), DamageOutcome::default());
        }
        assert_eq!(health.current, 10.0);
    }

    #[test]
    fn second_lethal_call_is_a_no_op() {
        let mut health = Health::full(10.0);
        assert!(apply_damage(&mut health, 10.0).lethal);
        let again = apply_damage(&mut health, 10.0);
        assert_eq!(again.dealt, 0.0);
        assert!(!again.lethal);
    }

    #[test]
    fn player_killed_emitted_once() {
        let mut player = Player::new(Default::default(), Default::default(), 20.0);
        let mut events = Vec::new();
        let mut stats = SessionStats::default();
        damage_player(&mut player, 15.0, None, &mut events, &mut stats);
        damage_player(&mut player, 15.0, None, &mut events, &mut stats);
        damage_player(&mut player, 15.0, None, &mut events, &mut stats);

        let kills = events
            .iter()
            .filter(|e| matches!(e, SimEvent::PlayerKilled))
            .count();
        assert_eq!(kills, 1);
        assert!(!player.alive);
        assert_eq!(player.health.current, 0.0);
        assert_eq!(stats.damage_taken, 20.0);
    }
}
