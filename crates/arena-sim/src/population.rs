//! Population bookkeeping: the ordered mob roster, handle conversion, the
//! spawn-position search, and weighted profile selection.
//!
//! Stored in `ArenaEngine`, NOT as ECS state. The hecs world does not keep
//! insertion order, so the roster is the authority on which mobs are live
//! and in what order they are visited.

use hecs::Entity;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use arena_core::config::{MobProfile, SpawnRules};
use arena_core::geometry::distance;
use arena_core::types::{DVec2, MobId, WorldBounds};

/// Public handle for a mob entity.
pub fn mob_id(entity: Entity) -> MobId {
    MobId(entity.to_bits().get())
}

/// Entity behind a public handle, if the bits are well-formed. The entity
/// may still have been despawned since.
pub fn entity_of(id: MobId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Live mobs in spawn order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entities: Vec<Entity>,
}

impl Roster {
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove `entity`, keeping the order of the rest.
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.entities.iter().position(|&e| e == entity) {
            Some(index) => {
                self.entities.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

/// Outcome of one spawn-position search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSearch {
    /// Chosen point (mob center).
    pub point: DVec2,
    /// Samples drawn, at most `max_attempts`.
    pub attempts: u32,
    /// The point clears the minimum player distance.
    pub safe: bool,
}

/// Sample uniform points inside the margin until one is farther than the
/// minimum distance from `player_center`. After `max_attempts` misses the
/// last sample is used anyway.
pub fn find_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &WorldBounds,
    rules: &SpawnRules,
    player_center: DVec2,
) -> SpawnSearch {
    let max_attempts = rules.max_attempts.max(1);
    let mut point = DVec2::new(bounds.width * 0.5, bounds.height * 0.5);

    for attempt in 1..=max_attempts {
        point = DVec2::new(
            sample_axis(rng, rules.margin, bounds.width - rules.margin),
            sample_axis(rng, rules.margin, bounds.height - rules.margin),
        );
        if distance(point, player_center) > rules.min_player_distance {
            return SpawnSearch {
                point,
                attempts: attempt,
                safe: true,
            };
        }
    }

    SpawnSearch {
        point,
        attempts: max_attempts,
        safe: false,
    }
}

/// Uniform in `[lo, hi]`; the midpoint when the margin swallows the axis.
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) * 0.5
    }
}

/// Index of a profile chosen with probability proportional to its weight.
///
/// Non-positive and non-finite weights never win. When no weight is usable
/// the pick is uniform. `None` only for an empty table.
pub fn pick_profile<R: Rng + ?Sized>(rng: &mut R, profiles: &[MobProfile]) -> Option<usize> {
    if profiles.is_empty() {
        return None;
    }

    let weights: Vec<f64> = profiles
        .iter()
        .map(|p| {
            if p.weight.is_finite() && p.weight > 0.0 {
                p.weight
            } else {
                0.0
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();

    if total.is_finite() && total > 0.0 {
        if let Ok(dist) = WeightedIndex::new(&weights) {
            return Some(dist.sample(rng));
        }
    }
    Some(rng.gen_range(0..profiles.len()))
}
