//! Simulation engine: owns the world and runs one tick at a time.
//!
//! `ArenaEngine` owns the hecs world, the mob roster, the player, and the
//! combo engine. It processes host commands, runs all systems against the
//! host-supplied elapsed delta, and produces `ArenaSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::commands::HostCommand;
use arena_core::components::Player;
use arena_core::config::{ArenaConfig, ConfigError};
use arena_core::constants::MAX_TARGET_POPULATION;
use arena_core::enums::{AreaEffectKind, SessionPhase};
use arena_core::events::SimEvent;
use arena_core::geometry::clamp_to_bounds;
use arena_core::state::{ArenaSnapshot, ComboStats, MobRecord, SessionStats};
use arena_core::types::{DVec2, MobId, SimTime};

use crate::combat;
use crate::combo::ComboEngine;
use crate::events::{EventObserver, Observers};
use crate::population::{entity_of, mob_id, Roster};
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the world and all session state.
pub struct ArenaEngine {
    config: ArenaConfig,
    world: World,
    roster: Roster,
    player: Player,
    combo: ComboEngine,
    stats: SessionStats,
    time: SimTime,
    phase: SessionPhase,
    target_population: usize,
    rng: ChaCha8Rng,
    command_queue: VecDeque<HostCommand>,
    dead_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    observers: Observers,
}

impl ArenaEngine {
    /// Create an engine. Fails only when the mob table is empty; every other
    /// out-of-range setting is sanitized.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = config.sanitized();

        tracing::info!(
            seed = config.seed,
            width = config.world.width,
            height = config.world.height,
            target = config.target_population,
            profiles = config.mobs.len(),
            "arena engine created"
        );

        Ok(Self {
            world: World::new(),
            roster: Roster::default(),
            player: new_player(&config),
            combo: ComboEngine::new(config.combo.clone()),
            stats: SessionStats::default(),
            time: SimTime::default(),
            phase: SessionPhase::default(),
            target_population: config.target_population,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            dead_buffer: Vec::new(),
            events: Vec::new(),
            observers: Observers::default(),
            config,
        })
    }

    /// Register an observer for every event from now on.
    pub fn subscribe(&mut self, observer: impl EventObserver + Send + 'static) {
        self.observers.subscribe(observer);
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `elapsed_ms` and return the resulting
    /// snapshot. The delta is capped at the configured frame maximum;
    /// non-finite or negative deltas count as zero.
    pub fn tick(&mut self, elapsed_ms: f64) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            let elapsed = self.sanitize_elapsed(elapsed_ms);
            self.time.advance(elapsed);
            self.run_systems(elapsed);
        }

        let events = std::mem::take(&mut self.events);
        self.observers.dispatch(&events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.roster,
            &self.player,
            &self.time,
            self.phase,
            self.combo.stats(),
            &self.stats,
            events,
        )
    }

    // --- Direct operations (take effect immediately) ---

    /// Damage one mob on the player's behalf. Returns the damage actually
    /// dealt; a stale handle or invalid amount deals nothing.
    pub fn damage_mob(&mut self, mob: MobId, amount: f64) -> f64 {
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(%mob, amount, "ignoring invalid strike amount");
            return 0.0;
        }
        let Some(entity) = entity_of(mob).filter(|e| self.roster.contains(*e)) else {
            return 0.0;
        };
        let dealt = combat::damage_mob(&mut self.world, entity, amount, &mut self.events).dealt;
        self.credit_player(dealt);
        dealt
    }

    /// Area strike on the player's behalf, with linear falloff to the edge.
    pub fn strike_area(&mut self, center: DVec2, radius: f64, damage: f64) -> f64 {
        if !center.is_finite() || !radius.is_finite() || !damage.is_finite() || radius < 0.0 {
            tracing::warn!(?center, radius, damage, "ignoring invalid area strike");
            return 0.0;
        }
        let dealt = systems::area_pulse::run(
            &mut self.world,
            &self.roster,
            AreaEffectKind::PlayerStrike,
            center,
            radius,
            damage,
            &mut self.events,
        );
        self.credit_player(dealt);
        dealt
    }

    /// Damage the player from outside the simulation (hazards, scripted hits).
    pub fn damage_player(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(amount, "ignoring invalid player damage");
            return 0.0;
        }
        combat::damage_player(
            &mut self.player,
            amount,
            None,
            &mut self.events,
            &mut self.stats,
        )
    }

    /// Move the player's top-left corner, clamped into the arena. A
    /// non-finite position is ignored.
    pub fn set_player_position(&mut self, position: DVec2) {
        if !position.is_finite() {
            tracing::warn!(?position, "ignoring non-finite player position");
            return;
        }
        self.player.body.position =
            clamp_to_bounds(position, self.player.body.size, &self.config.world);
    }

    /// Restore a dead player to full health. No effect while alive.
    pub fn revive_player(&mut self) {
        if self.player.alive {
            return;
        }
        self.player.health.current = self.player.health.max;
        self.player.alive = true;
        tracing::info!("player revived");
    }

    pub fn set_target_population(&mut self, count: usize) {
        self.target_population = count.min(MAX_TARGET_POPULATION);
    }

    /// Clear every mob, the combo state, and the statistics, and restart the
    /// clock and the random stream from the configured seed.
    pub fn reset(&mut self) {
        self.despawn_all();
        self.player = new_player(&self.config);
        self.combo.reset();
        self.stats = SessionStats::default();
        self.time = SimTime::default();
        self.phase = SessionPhase::Active;
        self.target_population = self.config.target_population;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.events.clear();
        tracing::info!(seed = self.config.seed, "session reset");
    }

    // --- Persistence hooks ---

    /// Plain records of the live population, in roster order.
    pub fn export_population(&self) -> Vec<MobRecord> {
        self.live_mobs()
    }

    /// Replace the live population with `records`. Stats are re-resolved by
    /// profile name; records naming an unknown profile, or with no health
    /// left, are dropped. Restored mobs get fresh handles. Returns how many
    /// were restored.
    pub fn restore_population(&mut self, records: &[MobRecord]) -> usize {
        self.despawn_all();

        for record in records {
            let Some(profile) = self.config.profile(&record.profile) else {
                tracing::warn!(profile = %record.profile, "dropping record with unknown profile");
                continue;
            };
            let Some(entity) =
                world_setup::restore_mob(&mut self.world, profile, record, &self.config.world)
            else {
                tracing::warn!(mob = %record.id, "dropping unusable mob record");
                continue;
            };
            self.roster.push(entity);
            if let Some(restored) = systems::snapshot::build_mob(&self.world, entity) {
                self.events.push(SimEvent::MobSpawned {
                    mob: mob_id(entity),
                    kind: restored.kind,
                    position: restored.position,
                });
            }
        }

        tracing::info!(
            restored = self.roster.len(),
            offered = records.len(),
            "population restored"
        );
        self.roster.len()
    }

    // --- Queries ---

    /// Live mobs in spawn order.
    pub fn live_mobs(&self) -> Vec<MobRecord> {
        systems::snapshot::build_mobs(&self.world, &self.roster)
    }

    pub fn mob(&self, mob: MobId) -> Option<MobRecord> {
        let entity = entity_of(mob).filter(|e| self.roster.contains(*e))?;
        systems::snapshot::build_mob(&self.world, entity)
    }

    /// Live mobs plus one for a living player.
    pub fn player_count(&self) -> usize {
        self.live_mobs().len() + usize::from(self.player.alive)
    }

    pub fn combo_stats(&self) -> ComboStats {
        self.combo.stats()
    }

    pub fn session_stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn target_population(&self) -> usize {
        self.target_population
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a mob of the named profile at an exact position (for tests).
    #[cfg(test)]
    pub fn spawn_test_mob(&mut self, profile: &str, position: DVec2) -> Option<MobId> {
        let profile = self.config.profile(profile)?.clone();
        let position = clamp_to_bounds(position, profile.size, &self.config.world);
        let entity = world_setup::spawn_mob(&mut self.world, &profile, position);
        self.roster.push(entity);
        Some(mob_id(entity))
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::MovePlayer { x, y } => self.set_player_position(DVec2::new(x, y)),
            HostCommand::StrikeMob { mob, amount } => {
                self.damage_mob(mob, amount);
            }
            HostCommand::StrikeArea {
                x,
                y,
                radius,
                damage,
            } => {
                self.strike_area(DVec2::new(x, y), radius, damage);
            }
            HostCommand::RevivePlayer => self.revive_player(),
            HostCommand::SetTargetPopulation { count } => self.set_target_population(count),
            HostCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                }
            }
            HostCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                }
            }
            HostCommand::Reset => self.reset(),
        }
    }

    fn sanitize_elapsed(&self, elapsed_ms: f64) -> f64 {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            tracing::warn!(elapsed_ms, "treating invalid elapsed delta as zero");
            return 0.0;
        }
        elapsed_ms.min(self.config.max_frame_ms)
    }

    /// Despawn entities one by one rather than clearing the world, so that
    /// generations advance and old handles stay stale.
    fn despawn_all(&mut self) {
        let entities: Vec<Entity> = self.world.iter().map(|e| e.entity()).collect();
        for entity in entities {
            let _ = self.world.despawn(entity);
        }
        self.roster.clear();
    }

    fn credit_player(&mut self, dealt: f64) {
        self.player.damage_dealt += dealt;
        self.stats.damage_dealt += dealt;
    }

    /// Run all systems in order.
    fn run_systems(&mut self, elapsed_ms: f64) {
        let now_ms = self.time.now_ms;

        // 1. Player containment
        self.player.body.position = clamp_to_bounds(
            self.player.body.position,
            self.player.body.size,
            &self.config.world,
        );
        // 2. Combo deadline
        if self.combo.expire(now_ms) {
            tracing::debug!("combo expired");
            self.events.push(SimEvent::ComboChanged {
                streak: 0,
                multiplier: 1.0,
            });
        }
        // 3. Mob behavior, projectiles, attacks
        systems::behavior::run(
            &mut self.world,
            &self.roster,
            &mut self.player,
            &self.config.world,
            elapsed_ms,
            &mut self.rng,
            &mut self.events,
            &mut self.stats,
        );
        // 4. Death sweep, kill payouts, combo pulses
        systems::cleanup::run(
            &mut self.world,
            &mut self.roster,
            &mut self.combo,
            now_ms,
            &mut self.dead_buffer,
            &mut self.events,
            &mut self.stats,
        );
        // 5. Backfill to target
        systems::spawner::run(
            &mut self.world,
            &mut self.roster,
            &self.config,
            self.target_population,
            self.player.body.center(),
            &mut self.rng,
            &mut self.events,
            &mut self.stats,
        );
    }
}

fn new_player(config: &ArenaConfig) -> Player {
    let start = clamp_to_bounds(config.player.start, config.player.size, &config.world);
    Player::new(start, config.player.size, config.player.max_health)
}
