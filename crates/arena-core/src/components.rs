//! Entity components and the player record.
//!
//! Components are plain data. Game logic lives in the behavior crate and the
//! simulation systems, not here.

use serde::{Deserialize, Serialize};

use crate::config::BehaviorProfile;
use crate::enums::BehaviorKind;
use crate::geometry::Aabb;
use crate::types::{DVec2, MobId};

/// Hit points. `current` is always finite and within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    /// Full health; a non-finite or negative maximum becomes zero.
    pub fn full(max: f64) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self { current: max, max }
    }

    /// Health at `current`, clamped into `[0, max]`.
    pub fn at(current: f64, max: f64) -> Self {
        let mut health = Self::full(max);
        if current.is_finite() {
            health.current = current.clamp(0.0, health.max);
        }
        health
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Spatial footprint: top-left position plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub size: DVec2,
}

impl Body {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn center(&self) -> DVec2 {
        self.aabb().center()
    }
}

/// Per-mob combat stats, resolved from its profile at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    /// Name of the profile this mob was spawned from.
    pub profile: String,
    pub behavior: BehaviorProfile,
    /// Units per second.
    pub speed: f64,
    pub contact_damage: f64,
    pub reward: u32,
    pub attack_interval_ms: f64,
    /// Counts down by elapsed time; the mob may attack at zero.
    pub cooldown_ms: f64,
    /// Where the killing (or most recent) blow landed.
    pub last_hit: Option<DVec2>,
}

impl Mob {
    pub fn kind(&self) -> BehaviorKind {
        self.behavior.kind()
    }
}

/// Held strafe direction for ranged kiters; zero when not strafing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Strafe {
    pub direction: DVec2,
}

/// A ranged munition. Owned by exactly one mob's `Volley`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Top-left corner.
    pub position: DVec2,
    /// Unit direction of travel.
    pub direction: DVec2,
    /// Units per second.
    pub speed: f64,
    pub damage: f64,
    pub size: DVec2,
    /// Mob that fired it (non-owning).
    pub owner: MobId,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }
}

/// Live projectiles fired by a ranged mob. Despawning the mob drops them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Volley {
    pub projectiles: Vec<Projectile>,
}

/// The singleton player. Position is written by the host; the simulation
/// only writes health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: Health,
    pub alive: bool,
    /// Actual damage dealt to mobs through host strikes.
    pub damage_dealt: f64,
}

impl Player {
    pub fn new(position: DVec2, size: DVec2, max_health: f64) -> Self {
        Self {
            body: Body { position, size },
            health: Health::full(max_health),
            alive: true,
            damage_dealt: 0.0,
        }
    }
}
