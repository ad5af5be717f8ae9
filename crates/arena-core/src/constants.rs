//! Simulation constants and tuning defaults.
//!
//! These seed `ArenaConfig::default()`; a loaded config may override any of
//! them.

// --- World bounds ---

/// Arena width in world units.
pub const WORLD_WIDTH: f64 = 3200.0;

/// Arena height in world units.
pub const WORLD_HEIGHT: f64 = 2560.0;

// --- Frame timing ---

/// Largest elapsed delta a single tick integrates (milliseconds).
pub const MAX_FRAME_MS: f64 = 50.0;

/// Nominal host frame rate (Hz) for the headless scheduler.
pub const FRAME_RATE: u32 = 60;

// --- Population ---

/// Number of live mobs the population manager maintains.
pub const TARGET_POPULATION: usize = 14;

/// Upper bound on the population target a host may request.
pub const MAX_TARGET_POPULATION: usize = 512;

/// Spawn samples stay this far inside every arena edge.
pub const SPAWN_MARGIN: f64 = 60.0;

/// A spawn sample must be farther than this from the player.
pub const MIN_SPAWN_DISTANCE: f64 = 400.0;

/// Spawn samples drawn before the last one is accepted regardless.
pub const MAX_SPAWN_ATTEMPTS: u32 = 30;

// --- Player ---

/// Player starting health.
pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Player box extent.
pub const PLAYER_SIZE: f64 = 48.0;

// --- Combo ---

/// Kill window; each kill re-arms the deadline to `now + COMBO_WINDOW_MS`.
pub const COMBO_WINDOW_MS: f64 = 3000.0;

/// Every Nth consecutive kill releases an area pulse.
pub const COMBO_PULSE_EVERY: u32 = 5;

/// Pulse radius in world units.
pub const COMBO_PULSE_RADIUS: f64 = 260.0;

/// Pulse damage at the epicentre; falls to zero at the radius.
pub const COMBO_PULSE_DAMAGE: f64 = 80.0;

/// Default (streak, multiplier) thresholds.
pub const COMBO_THRESHOLDS: [(u32, f64); 6] = [
    (5, 1.5),
    (10, 2.0),
    (15, 2.5),
    (20, 3.0),
    (30, 4.0),
    (50, 5.0),
];

// --- Sanitizing floors ---

/// Profiles never spawn with less health than this.
pub const MIN_MOB_HEALTH: f64 = 1.0;

/// Projectiles never fly slower than this (units per second).
pub const MIN_PROJECTILE_SPEED: f64 = 1.0;
