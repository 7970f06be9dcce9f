//! Game state snapshot — the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameSignal;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub meteor: MeteorView,
    pub economy: EconomyView,
    /// Set while the engine refuses to run waves because of bad configuration.
    pub config_error: Option<String>,
    /// Signals emitted during this tick, in order.
    pub signals: Vec<GameSignal>,
}

/// Wave and countdown status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub phase: WavePhase,
    /// True while the countdown and meteor are live.
    pub running: bool,
    /// Countdown for display, whole seconds rounded up.
    pub seconds_remaining: u32,
    /// Countdown as continuous time.
    pub remaining_secs: f64,
    pub urgency: CountdownUrgency,
    /// Time until the scheduled next wave start, if one is pending.
    pub next_wave_in_secs: Option<f64>,
}

/// Meteor status for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeteorView {
    pub phase: MeteorPhase,
    pub position: Position,
    /// Journey fraction (0.0 - 1.0).
    pub progress: f64,
    pub scale: f64,
    pub visible: bool,
    /// Terminal animation currently playing.
    pub animation: Option<NeutralizeKind>,
    /// Last Chance was used against this meteor.
    pub last_chance_used: bool,
}

/// Currency and shop status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub currency: u64,
    pub click_multiplier: u32,
    pub power_ups: Vec<PowerUpView>,
}

/// One shop entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: PowerUpId,
    pub name: String,
    pub cost: u64,
    pub purchased: bool,
    /// Not yet purchased and within the current balance.
    pub affordable: bool,
}
