//! Player commands sent from the UI/shop layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::PowerUpId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Begin the run: the first wave starts after the start delay.
    StartGame,
    /// The planet was clicked. Only counts while a wave is running.
    ClickPlanet,
    /// Buy a shop item.
    PurchasePowerUp { id: PowerUpId },
    /// Fire an owned Laser or Wormhole at the meteor in flight.
    ActivatePowerUp { id: PowerUpId },
    /// Last Chance: launch evacuation ships from the planet. Once per wave,
    /// free, and has no bearing on how the wave resolves.
    LaunchEvacuation,
    /// Reset the run to wave 1.
    RestartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
