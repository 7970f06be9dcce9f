//! Wave orchestrator — the core state machine.
//!
//! `Dormant → WaveActive → Resolving → {WaveSuccess | GameOver}`
//!
//! The orchestrator is the only driver of the clock, the meteor and the
//! defense policy. It holds them by value, wired at construction through
//! [`WaveOrchestratorBuilder`], and borrows the economy for the duration of
//! each call. Everything happens inside [`WaveOrchestrator::tick`] or a
//! command handler; multi-tick waits (start delay, success pause) are plain
//! countdowns stored in `pending_start`.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use meteorfall_core::config::GameConfig;
use meteorfall_core::constants::{EVAC_SHIP_COUNT, EVAC_SPAWN_RADIUS, FIRST_WAVE, TIME_EPSILON};
use meteorfall_core::enums::{
    CountdownUrgency, DefenseOutcome, MeteorPhase, NeutralizeKind, PowerUpId, WavePhase,
};
use meteorfall_core::error::ConfigError;
use meteorfall_core::events::GameSignal;
use meteorfall_core::state::{MeteorView, WaveView};
use meteorfall_core::types::Position;
use meteorfall_meteor::{MeteorAgent, MeteorEvent, MeteorSettings};

use crate::clock::{Clock, Countdown};
use crate::defense::{DefensePolicy, ThresholdPolicy};
use crate::economy::Economy;
use crate::meteor_control::MeteorControl;

/// Wave bookkeeping. Created once and mutated in place for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    /// Starts at 1 and only increments on a successful defense.
    pub wave_number: u32,
    /// True while the countdown and meteor are live.
    pub running: bool,
    pub wave_duration_secs: f64,
}

/// What asked for the current wave to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveTrigger {
    TimerExpired,
    MeteorArrived,
    /// The meteor was neutralized by a direct command. The defense policy
    /// still decides whether the wave is survived.
    MeteorNeutralized(NeutralizeKind),
}

/// Wires the orchestrator's collaborators. Every one is required.
pub struct WaveOrchestratorBuilder<C, M, D> {
    config: GameConfig,
    clock: Option<C>,
    meteor: Option<M>,
    policy: Option<D>,
}

impl<C, M, D> WaveOrchestratorBuilder<C, M, D>
where
    C: Countdown,
    M: MeteorControl,
    D: DefensePolicy,
{
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            clock: None,
            meteor: None,
            policy: None,
        }
    }

    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn meteor(mut self, meteor: M) -> Self {
        self.meteor = Some(meteor);
        self
    }

    pub fn policy(mut self, policy: D) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Validate the configuration and check that nothing is missing.
    pub fn build(self) -> Result<WaveOrchestrator<C, M, D>, ConfigError> {
        self.config.validate()?;
        let clock = self.clock.ok_or(ConfigError::MissingCollaborator("clock"))?;
        let meteor = self
            .meteor
            .ok_or(ConfigError::MissingCollaborator("meteor"))?;
        let policy = self
            .policy
            .ok_or(ConfigError::MissingCollaborator("defense policy"))?;

        Ok(WaveOrchestrator {
            clock,
            meteor,
            policy,
            wave: WaveState {
                wave_number: FIRST_WAVE,
                running: false,
                wave_duration_secs: self.config.wave.duration_secs,
            },
            phase: WavePhase::Dormant,
            spawn_points: self.config.spawn_points,
            planet_center: self.config.planet.center,
            rng: ChaCha8Rng::seed_from_u64(self.config.seed),
            success_pause_secs: self.config.wave.success_pause_secs,
            start_delay_secs: self.config.wave.start_delay_secs,
            pending_start: None,
            last_outcome: None,
        })
    }
}

/// The wave state machine.
pub struct WaveOrchestrator<C = Clock, M = MeteorAgent, D = ThresholdPolicy> {
    clock: C,
    meteor: M,
    policy: D,
    wave: WaveState,
    phase: WavePhase,
    spawn_points: Vec<Position>,
    planet_center: Position,
    rng: ChaCha8Rng,
    success_pause_secs: f64,
    start_delay_secs: f64,
    /// Seconds until the next `start_wave`. Cleared by game over and
    /// replaced by restart, so a stale start can never fire.
    pending_start: Option<f64>,
    last_outcome: Option<DefenseOutcome>,
}

impl WaveOrchestrator {
    /// The standard wiring: [`Clock`], [`MeteorAgent`], [`ThresholdPolicy`].
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        WaveOrchestratorBuilder::new(config.clone())
            .clock(Clock::new())
            .meteor(MeteorAgent::new(MeteorSettings::from_config(config)))
            .policy(ThresholdPolicy)
            .build()
    }
}

impl<C, M, D> WaveOrchestrator<C, M, D>
where
    C: Countdown,
    M: MeteorControl,
    D: DefensePolicy,
{
    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.wave.running
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn meteor(&self) -> &M {
        &self.meteor
    }

    pub fn policy(&self) -> &D {
        &self.policy
    }

    /// Seconds until the scheduled next wave, if one is pending.
    pub fn pending_start_secs(&self) -> Option<f64> {
        self.pending_start
    }

    /// Outcome of the most recently resolved wave.
    pub fn last_outcome(&self) -> Option<DefenseOutcome> {
        self.last_outcome
    }

    /// Begin a run: the first wave starts after the start delay.
    pub fn begin(&mut self) {
        self.schedule_wave_start(self.start_delay_secs);
    }

    /// Schedule `start_wave` after `delay_secs`, replacing any pending start.
    pub fn schedule_wave_start(&mut self, delay_secs: f64) {
        if self.pending_start.is_some() {
            log::debug!("replacing pending wave start");
        }
        self.pending_start = Some(delay_secs.max(0.0));
    }

    /// `Dormant → WaveActive`. Launches the meteor from a random spawn point
    /// and starts the countdown. A no-op unless dormant.
    pub fn start_wave(&mut self, signals: &mut Vec<GameSignal>) -> bool {
        if self.phase != WavePhase::Dormant {
            log::debug!("start_wave ignored: wave is {:?}", self.phase);
            return false;
        }

        if self.meteor.phase() != MeteorPhase::Idle {
            self.meteor.reset();
        }
        let Some(&spawn_point) = self.spawn_points.choose(&mut self.rng) else {
            log::error!("start_wave: no spawn points configured");
            return false;
        };
        if !self.meteor.launch(spawn_point, self.wave.wave_number) {
            log::debug!("start_wave: meteor refused launch");
            return false;
        }

        let seconds = self.clock.start(self.wave.wave_duration_secs);
        self.wave.running = true;
        self.phase = WavePhase::WaveActive;
        log::info!(
            "wave {} started, meteor inbound from {spawn_point}",
            self.wave.wave_number
        );
        signals.push(GameSignal::WaveStarted {
            wave_number: self.wave.wave_number,
        });
        signals.push(GameSignal::TimerTick {
            seconds_remaining: seconds,
        });
        true
    }

    /// Advance every collaborator by `dt` seconds.
    ///
    /// Order: countdown, meteor, pending wave start. Resolution triggered by
    /// the countdown therefore reaches a still-moving meteor, and a wave
    /// started this tick begins with its full duration. Only a start that was
    /// already pending when the tick began has this tick's time taken off,
    /// so the success pause runs in full after the resolving tick.
    pub fn tick(&mut self, dt: f64, economy: &mut Economy, signals: &mut Vec<GameSignal>) {
        let start_due = self.count_down_pending_start(dt);

        let update = self.clock.advance(dt);
        if let Some(seconds_remaining) = update.tick {
            signals.push(GameSignal::TimerTick { seconds_remaining });
        }
        if update.expired {
            self.resolve(ResolveTrigger::TimerExpired, economy, signals);
        }

        match self.meteor.advance(dt) {
            Some(MeteorEvent::ReachedTarget) => {
                self.resolve(ResolveTrigger::MeteorArrived, economy, signals);
            }
            Some(MeteorEvent::Neutralized(kind)) => {
                self.resolve(ResolveTrigger::MeteorNeutralized(kind), economy, signals);
            }
            Some(MeteorEvent::Parked) => log::debug!("meteor parked"),
            None => {}
        }

        if start_due {
            if self.phase == WavePhase::WaveSuccess {
                self.phase = WavePhase::Dormant;
            }
            self.start_wave(signals);
        }
    }

    /// Returns true when the pending start has come due.
    fn count_down_pending_start(&mut self, dt: f64) -> bool {
        let Some(remaining) = self.pending_start.as_mut() else {
            return false;
        };
        *remaining -= dt.max(0.0);
        if *remaining > TIME_EPSILON {
            return false;
        }
        self.pending_start = None;
        true
    }

    /// `WaveActive → Resolving → {WaveSuccess | GameOver}`.
    ///
    /// Gated on `WaveActive`, so only the first trigger of a wave counts.
    /// Every trigger goes through the defense policy. A meteor that was
    /// already neutralized is not commanded again, and its own outcome is
    /// reported when the policy lets the wave stand.
    pub fn resolve(
        &mut self,
        trigger: ResolveTrigger,
        economy: &mut Economy,
        signals: &mut Vec<GameSignal>,
    ) {
        if self.phase != WavePhase::WaveActive {
            log::debug!("{trigger:?} ignored: wave is {:?}", self.phase);
            return;
        }
        self.phase = WavePhase::Resolving;
        self.wave.running = false;
        self.clock.stop();

        let decided = self
            .policy
            .resolve(self.wave.wave_number, economy.power_ups());
        let outcome = match trigger {
            ResolveTrigger::MeteorNeutralized(kind) if decided.is_defended() => kind.outcome(),
            ResolveTrigger::MeteorNeutralized(_) => DefenseOutcome::None,
            ResolveTrigger::TimerExpired | ResolveTrigger::MeteorArrived => {
                if let Some(kind) = decided.neutralize_kind() {
                    // A meteor that already arrived ignores this.
                    self.meteor.neutralize(kind);
                }
                decided
            }
        };
        log::debug!(
            "wave {} resolved by {trigger:?}: {outcome:?}",
            self.wave.wave_number
        );
        self.last_outcome = Some(outcome);

        if outcome.is_defended() {
            self.succeed(outcome, economy, signals);
        } else {
            self.game_over(signals);
        }
    }

    fn succeed(
        &mut self,
        outcome: DefenseOutcome,
        economy: &mut Economy,
        signals: &mut Vec<GameSignal>,
    ) {
        self.wave.wave_number += 1;
        economy.reset_power_ups();
        self.clock.stop();
        self.phase = WavePhase::WaveSuccess;
        self.schedule_wave_start(self.success_pause_secs);
        log::info!(
            "meteor {outcome:?}, advancing to wave {}",
            self.wave.wave_number
        );
        signals.push(GameSignal::MeteorNeutralized { outcome });
        signals.push(GameSignal::WaveSucceeded {
            new_wave_number: self.wave.wave_number,
        });
    }

    fn game_over(&mut self, signals: &mut Vec<GameSignal>) {
        self.clock.stop();
        self.meteor.reset();
        self.pending_start = None;
        self.phase = WavePhase::GameOver;
        log::info!("planet lost on wave {}", self.wave.wave_number);
        signals.push(GameSignal::MeteorImpacted);
        signals.push(GameSignal::GameOver {
            wave_number: self.wave.wave_number,
        });
    }

    /// Fire an owned Laser or Wormhole at the meteor in flight.
    ///
    /// Returns whether the meteor was hit. The wave then resolves at once,
    /// and the defense policy decides whether it is survived: past an item's
    /// last wave the hit does not save the planet. Passive items, unowned
    /// items and activations outside a running wave are ignored.
    pub fn activate_power_up(
        &mut self,
        id: PowerUpId,
        economy: &mut Economy,
        signals: &mut Vec<GameSignal>,
    ) -> bool {
        let kind = match id {
            PowerUpId::Laser => NeutralizeKind::Destroy,
            PowerUpId::Wormhole => NeutralizeKind::PassThrough,
            PowerUpId::ClickMultiplier | PowerUpId::Shield => {
                log::debug!("{} is passive and cannot be activated", id.name());
                return false;
            }
        };
        if self.phase != WavePhase::WaveActive {
            log::debug!("{} ignored: wave is {:?}", id.name(), self.phase);
            return false;
        }
        if !economy.power_ups().is_purchased(id) {
            log::debug!("{} ignored: not purchased", id.name());
            return false;
        }

        match self.meteor.neutralize(kind) {
            Some(MeteorEvent::Neutralized(kind)) => {
                self.resolve(ResolveTrigger::MeteorNeutralized(kind), economy, signals);
                true
            }
            _ => false,
        }
    }

    /// Last Chance: evacuation ships leave the planet while the meteor is
    /// inbound. Free, once per wave, and it leaves the wave's resolution to
    /// the defense policy. Returns whether the ships were launched.
    pub fn launch_evacuation(&mut self, signals: &mut Vec<GameSignal>) -> bool {
        if self.phase != WavePhase::WaveActive {
            log::debug!("evacuation ignored: wave is {:?}", self.phase);
            return false;
        }
        if !self.meteor.mark_last_chance() {
            log::debug!("evacuation ignored: already launched this wave");
            return false;
        }

        let ships: Vec<Position> = (0..EVAC_SHIP_COUNT)
            .map(|_| {
                let mut offset = random_unit_vector(&mut self.rng) * EVAC_SPAWN_RADIUS;
                offset.y = offset.y.abs();
                self.planet_center + offset
            })
            .collect();
        log::info!(
            "last chance: {} evacuation ships launched on wave {}",
            ships.len(),
            self.wave.wave_number
        );
        signals.push(GameSignal::EvacuationLaunched { ships });
        true
    }

    /// Back to wave 1 from any phase. Currency, multiplier and purchases are
    /// reset, the meteor is parked, and the first wave is scheduled after the
    /// start delay. Any previously scheduled start is discarded.
    pub fn restart_game(&mut self, economy: &mut Economy, signals: &mut Vec<GameSignal>) {
        self.pending_start = None;
        self.clock.stop();
        self.meteor.reset();
        self.wave.wave_number = FIRST_WAVE;
        self.wave.running = false;
        self.phase = WavePhase::Dormant;
        self.last_outcome = None;
        economy.reset();
        log::info!("run restarted");
        signals.push(GameSignal::Restarted);
        signals.push(GameSignal::CurrencyChanged {
            balance: economy.currency(),
        });
        self.schedule_wave_start(self.start_delay_secs);
    }

    pub fn wave_view(&self) -> WaveView {
        let remaining_secs = self.clock.remaining_secs();
        WaveView {
            wave_number: self.wave.wave_number,
            phase: self.phase,
            running: self.wave.running,
            seconds_remaining: self.clock.seconds_remaining(),
            remaining_secs,
            urgency: if self.wave.running {
                CountdownUrgency::from_remaining(remaining_secs)
            } else {
                CountdownUrgency::Calm
            },
            next_wave_in_secs: self.pending_start,
        }
    }

    pub fn meteor_view(&self) -> MeteorView {
        self.meteor.view()
    }
}

/// Uniform direction, by rejection from the unit cube.
fn random_unit_vector(rng: &mut impl Rng) -> Position {
    loop {
        let v = Position::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let length_squared = v.length_squared();
        if length_squared > 1e-6 && length_squared <= 1.0 {
            return v / length_squared.sqrt();
        }
    }
}
