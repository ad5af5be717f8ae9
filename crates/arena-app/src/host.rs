//! Host-facing handlers.
//!
//! These bridge host requests to the game loop thread via channels. Each
//! takes the shared `AppState`, so an embedding UI layer can call them from
//! whatever thread it runs on.

use std::sync::PoisonError;

use anyhow::{anyhow, bail};

use arena_core::commands::HostCommand;
use arena_core::config::ArenaConfig;
use arena_core::state::ArenaSnapshot;
use arena_sim::events::EventObserver;
use arena_sim::ArenaEngine;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

fn poisoned<T>(err: PoisonError<T>) -> anyhow::Error {
    anyhow!("app state lock poisoned: {err}")
}

/// Start the simulation. Builds an engine from `config` and spawns the game
/// loop thread if not already running.
pub fn start_simulation(state: &AppState, config: ArenaConfig) -> anyhow::Result<()> {
    start_with_observers(state, config, Vec::new())
}

/// Like [`start_simulation`], subscribing `observers` before the first tick.
pub fn start_with_observers(
    state: &AppState,
    config: ArenaConfig,
    observers: Vec<Box<dyn EventObserver + Send>>,
) -> anyhow::Result<()> {
    let mut tx_lock = state.command_tx.lock().map_err(poisoned)?;
    if tx_lock.is_some() {
        bail!("simulation already running");
    }

    let mut engine = ArenaEngine::new(config)?;
    for observer in observers {
        engine.subscribe(BoxedObserver(observer));
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, state.latest_snapshot.clone())?;
    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(poisoned)? = Some(handle);

    tracing::info!("simulation started");
    Ok(())
}

/// Send a host command to the simulation.
pub fn send_command(state: &AppState, command: HostCommand) -> anyhow::Result<()> {
    let tx_lock = state.command_tx.lock().map_err(poisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Host(command))
            .map_err(|e| anyhow!("failed to send command: {e}")),
        None => bail!("simulation not started"),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> anyhow::Result<Option<ArenaSnapshot>> {
    let lock = state.latest_snapshot.lock().map_err(poisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit. A no-op when the
/// simulation was never started.
pub fn shutdown(state: &AppState) -> anyhow::Result<()> {
    if let Some(tx) = state.command_tx.lock().map_err(poisoned)?.take() {
        // The loop also exits on disconnect, so a failed send is harmless.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    if let Some(handle) = state.loop_handle.lock().map_err(poisoned)?.take() {
        handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))?;
        tracing::info!("simulation stopped");
    }
    Ok(())
}

struct BoxedObserver(Box<dyn EventObserver + Send>);

impl EventObserver for BoxedObserver {
    fn on_event(&mut self, event: &arena_core::events::SimEvent) {
        self.0.on_event(event);
    }
}
