//! State shared between the console thread and the game loop thread.

use std::sync::{Arc, Mutex};

use meteorfall_core::commands::PlayerCommand;
use meteorfall_core::state::GameStateSnapshot;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick and read by the
/// console for `status`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the most recent snapshot, if the loop has ticked yet.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }
}
