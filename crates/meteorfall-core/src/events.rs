//! Signals emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::{DefenseOutcome, PowerUpId};
use crate::types::Position;

/// Output signals, drained into each tick's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameSignal {
    /// A wave began: meteor launched, countdown running.
    WaveStarted { wave_number: u32 },
    /// The whole-second countdown value changed.
    TimerTick { seconds_remaining: u32 },
    /// The meteor hit the planet.
    MeteorImpacted,
    /// The wave's defense held, with the outcome it produced. Always directly
    /// precedes `WaveSucceeded`. If the meteor had already reached the planet
    /// when the wave resolved (a fast meteor beating the countdown) no
    /// terminal animation plays and the meteor view reports `Impacting` for
    /// that tick.
    MeteorNeutralized { outcome: DefenseOutcome },
    /// Wave survived; the next wave will carry this number.
    WaveSucceeded { new_wave_number: u32 },
    /// Planet lost on the given wave.
    GameOver { wave_number: u32 },
    /// Last Chance fired: evacuation ships launched from these positions.
    EvacuationLaunched { ships: Vec<Position> },
    /// The run was reset to wave 1.
    Restarted,
    /// Currency balance changed (click or purchase).
    CurrencyChanged { balance: u64 },
    /// A shop item was bought.
    PowerUpPurchased { id: PowerUpId },
    /// A purchase was refused.
    PurchaseRejected { id: PowerUpId, reason: String },
}
