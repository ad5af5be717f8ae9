//! Game loop thread: runs the arena engine at 60Hz and publishes snapshots.
//!
//! The engine is built on the caller's thread, so configuration errors are
//! reported before anything is spawned, and then moved into the loop.
//! Commands arrive via `mpsc` channel. Each frame hands the engine the
//! measured wall-clock time since the previous frame; the engine caps it.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;

use arena_core::constants::FRAME_RATE;
use arena_core::state::ArenaSnapshot;
use arena_sim::ArenaEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    engine: ArenaEngine,
    latest_snapshot: Arc<Mutex<Option<ArenaSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// Drain every pending command into the engine. Returns `false` when the
/// loop should stop.
pub fn drain_commands(engine: &mut ArenaEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Host(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: ArenaEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<ArenaSnapshot>>,
) {
    tracing::info!(rate = FRAME_RATE, "game loop started");
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            break;
        }

        // 2. Advance by the measured frame time (engine handles pause and caps)
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;
        let snapshot = engine.tick(elapsed_ms);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            tracing::debug!("game loop behind schedule; resetting frame clock");
            next_frame_time = now;
        }
    }

    tracing::info!(ticks = engine.time().tick, "game loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::commands::HostCommand;
    use arena_core::config::ArenaConfig;
    use arena_core::enums::SessionPhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Host(HostCommand::Pause)).unwrap();
        tx.send(GameLoopCommand::Host(HostCommand::RevivePlayer))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Host(HostCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Host(HostCommand::RevivePlayer)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_on_shutdown_or_disconnect() {
        let mut engine = ArenaEngine::new(ArenaConfig::default()).unwrap();

        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Host(HostCommand::Pause)).unwrap();
        assert!(drain_commands(&mut engine, &rx));
        assert_eq!(engine.tick(16.0).phase, SessionPhase::Paused);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = ArenaEngine::new(ArenaConfig::default()).unwrap();

        // Run enough ticks to populate entities and projectiles
        for _ in 0..200 {
            engine.tick(16.7);
        }

        let snapshot = engine.tick(16.7);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_loop_publishes_and_shuts_down() {
        let engine = ArenaEngine::new(ArenaConfig::default()).unwrap();
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(engine, Arc::clone(&latest)).unwrap();

        std::thread::sleep(FRAME_DURATION * 6);
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().expect("loop published a snapshot");
        assert!(snapshot.time.tick >= 1);
        assert!(!snapshot.mobs.is_empty());
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }
}
