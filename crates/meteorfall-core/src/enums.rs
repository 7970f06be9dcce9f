//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Session-level phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine created, no run started yet.
    #[default]
    MainMenu,
    Active,
    Paused,
}

/// Wave orchestrator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Between waves. A wave start may be pending.
    #[default]
    Dormant,
    /// Timer counting down, meteor in flight.
    WaveActive,
    /// Outcome being decided. Never observed across a tick boundary.
    Resolving,
    /// Defense held; waiting out the pause before the next wave.
    WaveSuccess,
    /// Planet lost. Only a restart leaves this state.
    GameOver,
}

/// Meteor agent flight phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeteorPhase {
    /// Parked off-scene, ready for launch.
    #[default]
    Idle,
    /// Travelling from spawn point to planet center.
    Moving,
    /// Playing a terminal animation after a defense command.
    Neutralized,
    /// Reached the planet this tick.
    Impacting,
}

/// The four ways a meteor can be removed from play without an impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeutralizeKind {
    /// Laser kill.
    Destroy,
    /// Shield bounce.
    Deflect,
    /// Wormhole spiral.
    Divert,
    /// Meteor slips through a wormhole opened in the planet.
    PassThrough,
}

impl NeutralizeKind {
    /// Defense outcome this neutralization reports.
    pub fn outcome(self) -> DefenseOutcome {
        match self {
            NeutralizeKind::Destroy => DefenseOutcome::Destroyed,
            NeutralizeKind::Deflect => DefenseOutcome::Deflected,
            NeutralizeKind::Divert | NeutralizeKind::PassThrough => DefenseOutcome::Diverted,
        }
    }

    /// Destroy eliminates the meteor; every other kind merely diverts it.
    pub fn is_elimination(self) -> bool {
        self == NeutralizeKind::Destroy
    }
}

/// Result of checking the owned defenses against the incoming meteor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseOutcome {
    #[default]
    None,
    Destroyed,
    Deflected,
    Diverted,
}

impl DefenseOutcome {
    pub fn is_defended(self) -> bool {
        self != DefenseOutcome::None
    }

    /// Meteor command that realises this outcome.
    pub fn neutralize_kind(self) -> Option<NeutralizeKind> {
        match self {
            DefenseOutcome::None => None,
            DefenseOutcome::Destroyed => Some(NeutralizeKind::Destroy),
            DefenseOutcome::Deflected => Some(NeutralizeKind::Deflect),
            DefenseOutcome::Diverted => Some(NeutralizeKind::Divert),
        }
    }
}

/// Shop items, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpId {
    ClickMultiplier,
    Shield,
    Laser,
    Wormhole,
}

impl PowerUpId {
    pub const ALL: [PowerUpId; 4] = [
        PowerUpId::ClickMultiplier,
        PowerUpId::Shield,
        PowerUpId::Laser,
        PowerUpId::Wormhole,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            PowerUpId::ClickMultiplier => "Click Multiplier",
            PowerUpId::Shield => "Shield",
            PowerUpId::Laser => "Laser",
            PowerUpId::Wormhole => "Wormhole",
        }
    }

    /// Look up an item by a loose, case-insensitive name ("laser", "click-multiplier").
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "clickmultiplier" | "multiplier" | "click" => Some(PowerUpId::ClickMultiplier),
            "shield" => Some(PowerUpId::Shield),
            "laser" => Some(PowerUpId::Laser),
            "wormhole" => Some(PowerUpId::Wormhole),
            _ => None,
        }
    }

    /// Whether the player can fire this item at a meteor in flight.
    pub fn is_activatable(self) -> bool {
        matches!(self, PowerUpId::Laser | PowerUpId::Wormhole)
    }
}

/// Countdown display urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CountdownUrgency {
    #[default]
    Calm,
    Elevated,
    High,
    Critical,
}

impl CountdownUrgency {
    pub fn from_remaining(secs: f64) -> Self {
        if secs <= COUNTDOWN_CRITICAL_SECS {
            CountdownUrgency::Critical
        } else if secs <= COUNTDOWN_HIGH_SECS {
            CountdownUrgency::High
        } else if secs <= COUNTDOWN_ELEVATED_SECS {
            CountdownUrgency::Elevated
        } else {
            CountdownUrgency::Calm
        }
    }
}
