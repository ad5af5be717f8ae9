//! Area damage with linear falloff, used by combo pulses and player strikes.

use hecs::World;

use arena_core::components::{Body, Health};
use arena_core::enums::AreaEffectKind;
use arena_core::events::SimEvent;
use arena_core::geometry::distance;
use arena_core::types::DVec2;

use crate::combat;
use crate::population::Roster;

/// Damage at `dist` from the epicentre: `damage * (1 - dist / radius)`,
/// zero at and beyond the radius.
pub fn falloff(damage: f64, radius: f64, dist: f64) -> f64 {
    if radius <= 0.0 || !radius.is_finite() || dist >= radius {
        return 0.0;
    }
    damage * (1.0 - dist / radius)
}

/// Release one pulse at `center` against every live mob in the roster.
///
/// Targets are fixed before any damage lands, so the pulse is evaluated
/// once against the population as it stood. Mobs it kills are removed by
/// the next death sweep. Returns the total damage dealt.
pub fn run(
    world: &mut World,
    roster: &Roster,
    kind: AreaEffectKind,
    center: DVec2,
    radius: f64,
    damage: f64,
    events: &mut Vec<SimEvent>,
) -> f64 {
    if !center.is_finite() || !radius.is_finite() || !damage.is_finite() {
        return 0.0;
    }
    // Nothing can be hit; no effect to report.
    if radius <= 0.0 || damage <= 0.0 {
        return 0.0;
    }

    events.push(SimEvent::AreaEffect {
        kind,
        position: center,
        radius,
    });

    let targets: Vec<(hecs::Entity, f64)> = roster
        .as_slice()
        .iter()
        .filter_map(|&entity| {
            let mut query = world.query_one::<(&Body, &Health)>(entity).ok()?;
            let (body, health) = query.get()?;
            if health.is_depleted() {
                return None;
            }
            let amount = falloff(damage, radius, distance(center, body.center()));
            (amount > 0.0).then_some((entity, amount))
        })
        .collect();

    targets
        .into_iter()
        .map(|(entity, amount)| combat::damage_mob(world, entity, amount, events).dealt)
        .sum()
}
