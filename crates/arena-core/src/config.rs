//! Startup configuration: world, player, mob table, spawn rules, combo table.
//!
//! Configuration is plain serde data. `ArenaConfig::sanitized` is applied once
//! by the engine so that no later system has to re-check ranges.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::BehaviorKind;
use crate::types::{DVec2, WorldBounds};

/// Configuration errors reported to the host before the first tick.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The mob table is empty; nothing could ever spawn.
    #[error("mob configuration table defines no mob types")]
    NoMobTypes,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ranged attack and kiting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedParams {
    /// Firing range R. The mob flees inside 0.5R and pursues beyond 0.8R.
    pub range: f64,
    /// Units per second.
    pub projectile_speed: f64,
    pub projectile_damage: f64,
    pub projectile_size: DVec2,
    /// Per-tick chance of picking a fresh perpendicular strafe direction.
    pub strafe_repick_chance: f64,
    /// Per-tick chance of dropping the held strafe direction.
    pub strafe_stop_chance: f64,
}

impl Default for RangedParams {
    fn default() -> Self {
        Self {
            range: 520.0,
            projectile_speed: 180.0,
            projectile_damage: 12.0,
            projectile_size: DVec2::new(14.0, 14.0),
            strafe_repick_chance: 0.02,
            strafe_stop_chance: 0.005,
        }
    }
}

/// Behavior sum type. All per-kind data rides on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BehaviorProfile {
    MeleeAggressive,
    RangedKite(RangedParams),
}

impl BehaviorProfile {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            BehaviorProfile::MeleeAggressive => BehaviorKind::MeleeAggressive,
            BehaviorProfile::RangedKite(_) => BehaviorKind::RangedKite,
        }
    }
}

/// One row of the mob configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobProfile {
    pub name: String,
    /// Relative spawn weight.
    pub weight: f64,
    pub behavior: BehaviorProfile,
    pub max_health: f64,
    /// Units per second.
    pub speed: f64,
    pub contact_damage: f64,
    pub size: DVec2,
    pub reward: u32,
    pub attack_interval_ms: f64,
}

impl MobProfile {
    /// Clamp every field into its legal range.
    pub fn sanitized(mut self) -> Self {
        self.weight = non_negative(self.weight);
        self.max_health = non_negative(self.max_health).max(MIN_MOB_HEALTH);
        self.speed = non_negative(self.speed);
        self.contact_damage = non_negative(self.contact_damage);
        self.size = DVec2::new(non_negative(self.size.x), non_negative(self.size.y));
        self.attack_interval_ms = non_negative(self.attack_interval_ms);
        if let BehaviorProfile::RangedKite(ref mut ranged) = self.behavior {
            ranged.range = non_negative(ranged.range);
            ranged.projectile_speed = non_negative(ranged.projectile_speed).max(MIN_PROJECTILE_SPEED);
            ranged.projectile_damage = non_negative(ranged.projectile_damage);
            ranged.projectile_size = DVec2::new(
                non_negative(ranged.projectile_size.x),
                non_negative(ranged.projectile_size.y),
            );
            ranged.strafe_repick_chance = probability(ranged.strafe_repick_chance);
            ranged.strafe_stop_chance = probability(ranged.strafe_stop_chance);
        }
        self
    }
}

/// Default mob table: two melee chasers and one ranged kiter.
pub fn default_mob_table() -> Vec<MobProfile> {
    vec![
        MobProfile {
            name: "slime".into(),
            weight: 3.0,
            behavior: BehaviorProfile::MeleeAggressive,
            max_health: 35.0,
            speed: 80.0,
            contact_damage: 10.0,
            size: DVec2::new(48.0, 48.0),
            reward: 50,
            attack_interval_ms: 1000.0,
        },
        MobProfile {
            name: "brute".into(),
            weight: 1.0,
            behavior: BehaviorProfile::MeleeAggressive,
            max_health: 120.0,
            speed: 55.0,
            contact_damage: 22.0,
            size: DVec2::new(64.0, 64.0),
            reward: 120,
            attack_interval_ms: 1400.0,
        },
        MobProfile {
            name: "archer".into(),
            weight: 2.0,
            behavior: BehaviorProfile::RangedKite(RangedParams::default()),
            max_health: 60.0,
            speed: 95.0,
            contact_damage: 6.0,
            size: DVec2::new(44.0, 52.0),
            reward: 80,
            attack_interval_ms: 1800.0,
        },
    ]
}

/// Spawn-position search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRules {
    pub margin: f64,
    pub min_player_distance: f64,
    pub max_attempts: u32,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            margin: SPAWN_MARGIN,
            min_player_distance: MIN_SPAWN_DISTANCE,
            max_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

/// Player starting state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub start: DVec2,
    pub size: DVec2,
    pub max_health: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: DVec2::new(
                (WORLD_WIDTH - PLAYER_SIZE) * 0.5,
                (WORLD_HEIGHT - PLAYER_SIZE) * 0.5,
            ),
            size: DVec2::splat(PLAYER_SIZE),
            max_health: PLAYER_MAX_HEALTH,
        }
    }
}

/// Streak at or above which `multiplier` applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboThreshold {
    pub streak: u32,
    pub multiplier: f64,
}

/// Combo window, multiplier table, and milestone pulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboConfig {
    pub window_ms: f64,
    pub thresholds: Vec<ComboThreshold>,
    /// Pulse on every Nth streak value; zero disables pulses.
    pub pulse_every: u32,
    pub pulse_radius: f64,
    pub pulse_damage: f64,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            window_ms: COMBO_WINDOW_MS,
            thresholds: COMBO_THRESHOLDS
                .iter()
                .map(|&(streak, multiplier)| ComboThreshold { streak, multiplier })
                .collect(),
            pulse_every: COMBO_PULSE_EVERY,
            pulse_radius: COMBO_PULSE_RADIUS,
            pulse_damage: COMBO_PULSE_DAMAGE,
        }
    }
}

impl ComboConfig {
    /// Sort thresholds by streak and force the table to be monotone with
    /// every multiplier at least 1.
    pub fn sanitized(mut self) -> Self {
        self.window_ms = non_negative(self.window_ms);
        self.pulse_radius = non_negative(self.pulse_radius);
        self.pulse_damage = non_negative(self.pulse_damage);
        self.thresholds.retain(|t| t.streak > 0 && t.multiplier.is_finite());
        self.thresholds.sort_by_key(|t| t.streak);
        let mut floor = 1.0_f64;
        for threshold in &mut self.thresholds {
            floor = floor.max(threshold.multiplier);
            threshold.multiplier = floor;
        }
        self
    }
}

/// Complete startup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub seed: u64,
    pub world: WorldBounds,
    pub target_population: usize,
    pub max_frame_ms: f64,
    pub spawn: SpawnRules,
    pub player: PlayerConfig,
    pub mobs: Vec<MobProfile>,
    pub combo: ComboConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world: WorldBounds::default(),
            target_population: TARGET_POPULATION,
            max_frame_ms: MAX_FRAME_MS,
            spawn: SpawnRules::default(),
            player: PlayerConfig::default(),
            mobs: default_mob_table(),
            combo: ComboConfig::default(),
        }
    }
}

impl ArenaConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Only an empty mob table is fatal; everything else is sanitized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mobs.is_empty() {
            return Err(ConfigError::NoMobTypes);
        }
        Ok(())
    }

    pub fn sanitized(mut self) -> Self {
        self.world = self.world.sanitized();
        if !(self.max_frame_ms.is_finite() && self.max_frame_ms > 0.0) {
            self.max_frame_ms = MAX_FRAME_MS;
        }
        self.target_population = self.target_population.min(MAX_TARGET_POPULATION);
        self.spawn.margin = non_negative(self.spawn.margin);
        self.spawn.min_player_distance = non_negative(self.spawn.min_player_distance);
        self.spawn.max_attempts = self.spawn.max_attempts.max(1);
        self.player.size = DVec2::new(
            non_negative(self.player.size.x),
            non_negative(self.player.size.y),
        );
        self.player.max_health = non_negative(self.player.max_health).max(MIN_MOB_HEALTH);
        if !self.player.start.is_finite() {
            self.player.start = DVec2::ZERO;
        }
        self.mobs = self.mobs.into_iter().map(MobProfile::sanitized).collect();
        self.combo = self.combo.sanitized();
        self
    }

    pub fn profile(&self, name: &str) -> Option<&MobProfile> {
        self.mobs.iter().find(|p| p.name == name)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
