//! Defense resolver: decides whether owned power-ups stop this wave's meteor.
//!
//! Each defense only works up to a wave threshold, and the rules are checked
//! cheapest-first. A Shield bought on wave 5 therefore protects nothing even
//! though it is owned.

use meteorfall_core::constants::*;
use meteorfall_core::enums::{DefenseOutcome, PowerUpId};

use crate::economy::PowerUpSet;

/// Capability the wave orchestrator needs from its defense policy.
pub trait DefensePolicy {
    fn resolve(&self, wave_number: u32, power_ups: &PowerUpSet) -> DefenseOutcome;
}

/// One row of the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenseRule {
    pub power_up: PowerUpId,
    /// Highest wave on which this defense still works.
    pub max_wave: u32,
    pub outcome: DefenseOutcome,
}

/// Threshold table in priority order. First match wins.
pub const DEFENSE_RULES: [DefenseRule; 3] = [
    DefenseRule {
        power_up: PowerUpId::Shield,
        max_wave: SHIELD_MAX_WAVE,
        outcome: DefenseOutcome::Deflected,
    },
    DefenseRule {
        power_up: PowerUpId::Laser,
        max_wave: LASER_MAX_WAVE,
        outcome: DefenseOutcome::Destroyed,
    },
    DefenseRule {
        power_up: PowerUpId::Wormhole,
        max_wave: WORMHOLE_MAX_WAVE,
        outcome: DefenseOutcome::Diverted,
    },
];

/// Pure threshold policy over [`DEFENSE_RULES`].
pub fn resolve(wave_number: u32, power_ups: &PowerUpSet) -> DefenseOutcome {
    DEFENSE_RULES
        .iter()
        .find(|rule| wave_number <= rule.max_wave && power_ups.is_purchased(rule.power_up))
        .map(|rule| rule.outcome)
        .unwrap_or(DefenseOutcome::None)
}

/// The standard policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdPolicy;

impl DefensePolicy for ThresholdPolicy {
    fn resolve(&self, wave_number: u32, power_ups: &PowerUpSet) -> DefenseOutcome {
        resolve(wave_number, power_ups)
    }
}
