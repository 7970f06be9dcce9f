//! Meteor flight state machine.
//!
//! `Idle → Moving → {Impacting | Neutralized} → Idle`. Every command is a
//! no-op outside the phase it applies to, so late or duplicate commands from
//! racing signals are harmless.

use meteorfall_core::config::GameConfig;
use meteorfall_core::constants::*;
use meteorfall_core::enums::{MeteorPhase, NeutralizeKind};
use meteorfall_core::types::{EasingCurve, Position};

use crate::animation::TerminalAnimation;

/// How fast the meteor crosses its journey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedProfile {
    /// Constant speed in scene units per second.
    Fixed(f64),
    /// Speed chosen at launch so the journey takes exactly this many seconds.
    FlightTime(f64),
}

/// Static parameters of the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorSettings {
    pub base_scale: f64,
    pub planet_center: Position,
    /// Largest dimension of the planet.
    pub planet_extent: f64,
    pub parking_position: Position,
    pub easing: EasingCurve,
    pub speed: SpeedProfile,
}

impl Default for MeteorSettings {
    fn default() -> Self {
        Self {
            base_scale: METEOR_BASE_SCALE,
            planet_center: PLANET_CENTER,
            planet_extent: PLANET_EXTENT,
            parking_position: METEOR_PARKING_POSITION,
            easing: EasingCurve::Linear,
            speed: SpeedProfile::FlightTime(WAVE_DURATION_SECS),
        }
    }
}

impl MeteorSettings {
    pub fn from_config(config: &GameConfig) -> Self {
        let speed = match config.meteor.speed {
            Some(speed) => SpeedProfile::Fixed(speed),
            None => SpeedProfile::FlightTime(config.wave.duration_secs),
        };
        Self {
            base_scale: config.meteor.base_scale,
            planet_center: config.planet.center,
            planet_extent: config.planet.extent,
            parking_position: config.meteor.parking_position,
            easing: config.meteor.easing.clone(),
            speed,
        }
    }

    /// Meteor scale for a wave: baseline, then ×1.3, then sized against the
    /// planet. Never larger than `METEOR_MAX_PLANET_RATIO` of the planet.
    pub fn scale_for_wave(&self, wave_number: u32) -> f64 {
        let cap = METEOR_MAX_PLANET_RATIO * self.planet_extent;
        let scale = match wave_number {
            0 | 1 => self.base_scale,
            2 => self.base_scale * METEOR_WAVE2_SCALE_FACTOR,
            _ => cap,
        };
        scale.min(cap)
    }
}

/// Mutable state of the single meteor.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorState {
    pub phase: MeteorPhase,
    pub position: Position,
    pub start_position: Position,
    pub target_position: Position,
    /// Journey fraction (0.0 - 1.0). Never decreases while moving.
    pub progress: f64,
    /// Flight time since launch (seconds).
    pub elapsed_secs: f64,
    pub journey_length: f64,
    /// Speed fixed at launch (units/s).
    pub speed: f64,
    pub scale_factor: f64,
    pub visible: bool,
    pub animation: Option<TerminalAnimation>,
    /// Last Chance was used while this meteor was inbound.
    pub last_chance_used: bool,
}

impl MeteorState {
    fn parked(settings: &MeteorSettings) -> Self {
        Self {
            phase: MeteorPhase::Idle,
            position: settings.parking_position,
            start_position: settings.parking_position,
            target_position: settings.planet_center,
            progress: 0.0,
            elapsed_secs: 0.0,
            journey_length: 0.0,
            speed: 0.0,
            scale_factor: settings.base_scale,
            visible: false,
            animation: None,
            last_chance_used: false,
        }
    }
}

/// Notifications produced by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorEvent {
    /// Journey complete; the meteor is at the planet center.
    ReachedTarget,
    /// A defense command took effect.
    Neutralized(NeutralizeKind),
    /// Returned to the parking position, ready for the next launch.
    Parked,
}

/// The meteor agent. Holds exactly one meteor, re-initialized every wave.
#[derive(Debug, Clone)]
pub struct MeteorAgent {
    settings: MeteorSettings,
    state: MeteorState,
}

impl Default for MeteorAgent {
    fn default() -> Self {
        Self::new(MeteorSettings::default())
    }
}

impl MeteorAgent {
    pub fn new(settings: MeteorSettings) -> Self {
        let state = MeteorState::parked(&settings);
        Self { settings, state }
    }

    pub fn settings(&self) -> &MeteorSettings {
        &self.settings
    }

    pub fn state(&self) -> &MeteorState {
        &self.state
    }

    pub fn phase(&self) -> MeteorPhase {
        self.state.phase
    }

    /// Start a journey from `spawn_point` toward the planet center.
    ///
    /// Rejected unless idle. Returns whether the launch happened.
    pub fn launch(&mut self, spawn_point: Position, wave_number: u32) -> bool {
        if self.state.phase != MeteorPhase::Idle {
            log::debug!(
                "meteor launch ignored: already {:?}",
                self.state.phase
            );
            return false;
        }

        let target = self.settings.planet_center;
        let journey_length = spawn_point.distance(target);
        let speed = match self.settings.speed {
            SpeedProfile::Fixed(speed) => speed,
            SpeedProfile::FlightTime(secs) if secs > 0.0 => journey_length / secs,
            SpeedProfile::FlightTime(_) => f64::INFINITY,
        };

        self.state = MeteorState {
            phase: MeteorPhase::Moving,
            position: spawn_point,
            start_position: spawn_point,
            target_position: target,
            progress: 0.0,
            elapsed_secs: 0.0,
            journey_length,
            speed,
            scale_factor: self.settings.scale_for_wave(wave_number),
            visible: true,
            animation: None,
            last_chance_used: false,
        };
        log::debug!(
            "meteor launched from {spawn_point} (wave {wave_number}, {journey_length:.2} units at {speed:.2}/s)"
        );
        true
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Option<MeteorEvent> {
        let dt = dt.max(0.0);
        match self.state.phase {
            MeteorPhase::Idle => None,
            MeteorPhase::Moving => self.advance_flight(dt),
            // Impact lasts a single tick.
            MeteorPhase::Impacting => {
                self.park();
                Some(MeteorEvent::Parked)
            }
            MeteorPhase::Neutralized => self.advance_animation(dt),
        }
    }

    fn advance_flight(&mut self, dt: f64) -> Option<MeteorEvent> {
        let s = &mut self.state;
        s.elapsed_secs += dt;

        let raw = if s.journey_length <= MIN_JOURNEY_LENGTH {
            1.0
        } else {
            s.elapsed_secs * s.speed / s.journey_length
        };
        // NaN from a degenerate speed collapses to the previous progress.
        s.progress = raw.clamp(0.0, 1.0).max(s.progress);

        if s.progress >= 1.0 - TIME_EPSILON {
            s.progress = 1.0;
            s.position = s.target_position;
            s.phase = MeteorPhase::Impacting;
            log::debug!("meteor reached planet");
            return Some(MeteorEvent::ReachedTarget);
        }

        let fraction = self.settings.easing.evaluate(s.progress);
        s.position = s.start_position.lerp(s.target_position, fraction);
        None
    }

    fn advance_animation(&mut self, dt: f64) -> Option<MeteorEvent> {
        let Some(animation) = self.state.animation.as_mut() else {
            self.park();
            return Some(MeteorEvent::Parked);
        };
        let finished = animation.step(dt);
        let frame = animation.frame();
        self.state.position = frame.position;
        self.state.scale_factor = frame.scale;
        self.state.visible = frame.visible;

        if finished {
            self.park();
            return Some(MeteorEvent::Parked);
        }
        None
    }

    /// Laser kill.
    pub fn destroy(&mut self) -> Option<MeteorEvent> {
        self.neutralize(NeutralizeKind::Destroy)
    }

    /// Shield bounce.
    pub fn deflect(&mut self) -> Option<MeteorEvent> {
        self.neutralize(NeutralizeKind::Deflect)
    }

    /// Wormhole spiral.
    pub fn divert(&mut self) -> Option<MeteorEvent> {
        self.neutralize(NeutralizeKind::Divert)
    }

    /// Slip through the planet and out the far side.
    pub fn pass_through(&mut self) -> Option<MeteorEvent> {
        self.neutralize(NeutralizeKind::PassThrough)
    }

    /// Apply a defense command. Only effective while moving.
    pub fn neutralize(&mut self, kind: NeutralizeKind) -> Option<MeteorEvent> {
        if self.state.phase != MeteorPhase::Moving {
            log::debug!(
                "meteor {kind:?} ignored: meteor is {:?}",
                self.state.phase
            );
            return None;
        }

        let animation = TerminalAnimation::begin(
            kind,
            self.state.position,
            self.state.start_position,
            self.state.target_position,
            self.state.scale_factor,
        );
        let frame = animation.frame();
        self.state.phase = MeteorPhase::Neutralized;
        self.state.position = frame.position;
        self.state.visible = frame.visible;
        self.state.animation = Some(animation);
        log::debug!("meteor neutralized: {kind:?}");
        Some(MeteorEvent::Neutralized(kind))
    }

    /// Mark the inbound meteor as the target of Last Chance. Only while
    /// moving, and only once per journey.
    pub fn mark_last_chance(&mut self) -> bool {
        if self.state.phase != MeteorPhase::Moving || self.state.last_chance_used {
            log::debug!("last chance ignored: meteor is {:?}", self.state.phase);
            return false;
        }
        self.state.last_chance_used = true;
        true
    }

    /// Force back to idle from any phase, cancelling any animation.
    pub fn reset(&mut self) {
        if self.state.phase != MeteorPhase::Idle {
            log::debug!("meteor reset from {:?}", self.state.phase);
        }
        self.park();
    }

    fn park(&mut self) {
        self.state = MeteorState::parked(&self.settings);
    }
}
