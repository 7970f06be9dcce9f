//! The capability the wave orchestrator needs from its meteor.

use meteorfall_core::enums::{MeteorPhase, NeutralizeKind};
use meteorfall_core::state::MeteorView;
use meteorfall_core::types::Position;
use meteorfall_meteor::{MeteorAgent, MeteorEvent};

/// Meteor operations, resolved at wiring time.
pub trait MeteorControl {
    /// Start a journey. Returns false when rejected (not idle).
    fn launch(&mut self, spawn_point: Position, wave_number: u32) -> bool;
    fn advance(&mut self, dt: f64) -> Option<MeteorEvent>;
    fn neutralize(&mut self, kind: NeutralizeKind) -> Option<MeteorEvent>;
    /// Flag the inbound meteor for Last Chance. False unless moving and
    /// not yet flagged.
    fn mark_last_chance(&mut self) -> bool;
    fn reset(&mut self);
    fn phase(&self) -> MeteorPhase;
    fn view(&self) -> MeteorView;
}

impl MeteorControl for MeteorAgent {
    fn launch(&mut self, spawn_point: Position, wave_number: u32) -> bool {
        MeteorAgent::launch(self, spawn_point, wave_number)
    }

    fn advance(&mut self, dt: f64) -> Option<MeteorEvent> {
        MeteorAgent::advance(self, dt)
    }

    fn neutralize(&mut self, kind: NeutralizeKind) -> Option<MeteorEvent> {
        MeteorAgent::neutralize(self, kind)
    }

    fn mark_last_chance(&mut self) -> bool {
        MeteorAgent::mark_last_chance(self)
    }

    fn reset(&mut self) {
        MeteorAgent::reset(self)
    }

    fn phase(&self) -> MeteorPhase {
        MeteorAgent::phase(self)
    }

    fn view(&self) -> MeteorView {
        let state = self.state();
        MeteorView {
            phase: state.phase,
            position: state.position,
            progress: state.progress,
            scale: state.scale_factor,
            visible: state.visible,
            animation: state.animation.as_ref().map(|a| a.kind),
            last_chance_used: state.last_chance_used,
        }
    }
}
