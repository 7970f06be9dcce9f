//! Builds the complete `GameStateSnapshot` handed out after every tick.
//!
//! Read-only: nothing here mutates simulation state.

use meteorfall_core::config::GameConfig;
use meteorfall_core::enums::GamePhase;
use meteorfall_core::error::ConfigError;
use meteorfall_core::events::GameSignal;
use meteorfall_core::state::{GameStateSnapshot, MeteorView, WaveView};
use meteorfall_core::types::SimTime;

use crate::clock::Countdown;
use crate::defense::DefensePolicy;
use crate::economy::Economy;
use crate::meteor_control::MeteorControl;
use crate::orchestrator::WaveOrchestrator;

/// Build a snapshot. Without an orchestrator (configuration error) the wave
/// is reported as dormant and the meteor as parked.
pub fn build_snapshot<C, M, D>(
    time: &SimTime,
    phase: GamePhase,
    orchestrator: Option<&WaveOrchestrator<C, M, D>>,
    economy: &Economy,
    config: &GameConfig,
    config_error: Option<&ConfigError>,
    signals: Vec<GameSignal>,
) -> GameStateSnapshot
where
    C: Countdown,
    M: MeteorControl,
    D: DefensePolicy,
{
    let (wave, meteor) = match orchestrator {
        Some(orchestrator) => (orchestrator.wave_view(), orchestrator.meteor_view()),
        None => (
            WaveView::default(),
            MeteorView {
                position: config.meteor.parking_position,
                scale: config.meteor.base_scale,
                ..Default::default()
            },
        ),
    };

    GameStateSnapshot {
        time: *time,
        phase,
        wave,
        meteor,
        economy: economy.view(),
        config_error: config_error.map(ToString::to_string),
        signals,
    }
}
