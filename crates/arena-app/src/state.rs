//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use arena_core::commands::HostCommand;
use arena_core::state::ArenaSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A host command to forward to the simulation engine.
    Host(HostCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds what does not exist before `start_simulation`
/// - `Arc<Mutex<...>>` holds the latest snapshot, shared with the loop thread
pub struct AppState {
    /// Channel sender to the game loop thread. `None` until started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<ArenaSnapshot>>>,
    /// Game loop thread, joined on shutdown.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a game loop has been started and not yet shut down.
    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }
}
