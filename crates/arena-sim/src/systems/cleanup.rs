//! Death sweep: removes depleted mobs and pays out their kills.

use hecs::{Entity, World};

use arena_core::components::{Body, Health, Mob};
use arena_core::enums::AreaEffectKind;
use arena_core::events::SimEvent;
use arena_core::state::SessionStats;

use crate::combo::ComboEngine;
use crate::population::{mob_id, Roster};
use crate::systems::area_pulse;

/// Remove every mob whose health is depleted, emitting one `MobKilled` each.
///
/// The dead set is collected (back-to-front) before anything is removed.
/// Each kill feeds the combo engine, and a milestone kill fires a pulse at
/// the kill position. Mobs that pulse kills are left for the next sweep.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    roster: &mut Roster,
    combo: &mut ComboEngine,
    now_ms: f64,
    dead_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
    stats: &mut SessionStats,
) {
    dead_buffer.clear();
    for &entity in roster.as_slice().iter().rev() {
        let depleted = world
            .get::<&Health>(entity)
            .map_or(true, |health| health.is_depleted());
        if depleted {
            dead_buffer.push(entity);
        }
    }

    for entity in dead_buffer.drain(..) {
        roster.remove(entity);
        let Ok((body, mob)) = world.query_one_mut::<(&Body, &Mob)>(entity) else {
            continue;
        };
        let position = mob.last_hit.unwrap_or_else(|| body.center());
        let kind = mob.kind();
        let base_reward = mob.reward;
        let _ = world.despawn(entity);

        let payout = combo.register_kill(now_ms, base_reward);
        stats.kills += 1;
        stats.total_reward += u64::from(payout.reward);
        stats.total_bonus += u64::from(payout.bonus);

        let id = mob_id(entity);
        tracing::debug!(
            mob = %id,
            reward = payout.reward,
            streak = payout.streak,
            "mob killed"
        );
        events.push(SimEvent::MobKilled {
            mob: id,
            kind,
            base_reward,
            reward: payout.reward,
            bonus: payout.bonus,
            position,
        });
        events.push(SimEvent::ComboChanged {
            streak: payout.streak,
            multiplier: payout.multiplier,
        });

        if payout.pulse {
            let config = combo.config();
            let (radius, damage) = (config.pulse_radius, config.pulse_damage);
            stats.pulses_triggered += 1;
            let dealt = area_pulse::run(
                world,
                roster,
                AreaEffectKind::ComboPulse,
                position,
                radius,
                damage,
                events,
            );
            stats.damage_dealt += dealt;
            tracing::debug!(streak = payout.streak, dealt, "combo pulse");
        }
    }
}
