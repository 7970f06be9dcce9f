//! Simulation engine — the headless core of the game.
//!
//! `SimulationEngine` owns the wave orchestrator and the economy, processes
//! queued player commands at the tick boundary, advances the simulation and
//! produces `GameStateSnapshot`s. Deterministic for a given seed.

use std::collections::VecDeque;

use meteorfall_core::commands::PlayerCommand;
use meteorfall_core::config::GameConfig;
use meteorfall_core::enums::GamePhase;
use meteorfall_core::error::ConfigError;
use meteorfall_core::events::GameSignal;
use meteorfall_core::state::GameStateSnapshot;
use meteorfall_core::types::SimTime;

use crate::economy::Economy;
use crate::orchestrator::WaveOrchestrator;
use crate::snapshot;

/// The simulation engine.
pub struct SimulationEngine {
    config: GameConfig,
    /// `None` while the configuration is unusable; waves never run then.
    orchestrator: Option<WaveOrchestrator>,
    config_error: Option<ConfigError>,
    economy: Economy,
    time: SimTime,
    phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
    signals: Vec<GameSignal>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl SimulationEngine {
    /// Create an engine. A bad configuration is logged once and reported in
    /// every snapshot; it is not fatal to the process.
    pub fn new(config: GameConfig) -> Self {
        let mut engine = Self {
            economy: Economy::new(&config.power_ups),
            config: config.clone(),
            orchestrator: None,
            config_error: None,
            time: SimTime::default(),
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            signals: Vec::new(),
        };
        // The error is kept on the engine and surfaced in snapshots.
        let _ = engine.reconfigure(config);
        engine
    }

    /// Replace the configuration and return to the main menu with a fresh
    /// economy. On error, wave progression stays disabled until a later call
    /// succeeds.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        self.economy = Economy::new(&config.power_ups);
        self.time = SimTime::default();
        self.phase = GamePhase::MainMenu;
        self.command_queue.clear();
        self.signals.clear();

        let result = WaveOrchestrator::from_config(&config);
        self.config = config;
        match result {
            Ok(orchestrator) => {
                self.orchestrator = Some(orchestrator);
                self.config_error = None;
                Ok(())
            }
            Err(err) => {
                log::error!("configuration error, waves disabled: {err}");
                self.orchestrator = None;
                self.config_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            if let Some(orchestrator) = self.orchestrator.as_mut() {
                orchestrator.tick(self.time.dt(), &mut self.economy, &mut self.signals);
            }
            self.time.advance();
        }

        let signals = std::mem::take(&mut self.signals);
        snapshot::build_snapshot(
            &self.time,
            self.phase,
            self.orchestrator.as_ref(),
            &self.economy,
            &self.config,
            self.config_error.as_ref(),
            signals,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        self.config_error.as_ref()
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn orchestrator(&self) -> Option<&WaveOrchestrator> {
        self.orchestrator.as_ref()
    }

    /// Credit currency directly (for tests).
    #[cfg(test)]
    pub fn grant_currency(&mut self, amount: u64) {
        self.economy.deposit(amount);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase != GamePhase::MainMenu {
                    log::debug!("StartGame ignored: already {:?}", self.phase);
                    return;
                }
                let Some(orchestrator) = self.orchestrator.as_mut() else {
                    log::debug!("StartGame refused: configuration error");
                    return;
                };
                orchestrator.begin();
                self.phase = GamePhase::Active;
                self.time = SimTime::default();
            }
            PlayerCommand::ClickPlanet => {
                let running = self
                    .orchestrator
                    .as_ref()
                    .is_some_and(|orchestrator| orchestrator.is_running());
                if self.phase != GamePhase::Active || !running {
                    log::debug!("click ignored: no wave running");
                    return;
                }
                self.economy.click();
                self.signals.push(GameSignal::CurrencyChanged {
                    balance: self.economy.currency(),
                });
            }
            PlayerCommand::PurchasePowerUp { id } => {
                if self.phase == GamePhase::Paused {
                    log::debug!("purchase of {} ignored while paused", id.name());
                    return;
                }
                match self.economy.purchase(id) {
                    Ok(()) => {
                        log::debug!("purchased {}", id.name());
                        self.signals.push(GameSignal::PowerUpPurchased { id });
                        self.signals.push(GameSignal::CurrencyChanged {
                            balance: self.economy.currency(),
                        });
                    }
                    Err(err) => {
                        log::debug!("purchase of {} rejected: {err}", id.name());
                        self.signals.push(GameSignal::PurchaseRejected {
                            id,
                            reason: err.to_string(),
                        });
                    }
                }
            }
            PlayerCommand::ActivatePowerUp { id } => {
                if self.phase != GamePhase::Active {
                    log::debug!("activation of {} ignored: {:?}", id.name(), self.phase);
                    return;
                }
                if let Some(orchestrator) = self.orchestrator.as_mut() {
                    orchestrator.activate_power_up(id, &mut self.economy, &mut self.signals);
                }
            }
            PlayerCommand::LaunchEvacuation => {
                if self.phase != GamePhase::Active {
                    log::debug!("evacuation ignored: {:?}", self.phase);
                    return;
                }
                if let Some(orchestrator) = self.orchestrator.as_mut() {
                    orchestrator.launch_evacuation(&mut self.signals);
                }
            }
            PlayerCommand::RestartGame => {
                let Some(orchestrator) = self.orchestrator.as_mut() else {
                    log::debug!("RestartGame refused: configuration error");
                    return;
                };
                orchestrator.restart_game(&mut self.economy, &mut self.signals);
                self.phase = GamePhase::Active;
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }
}
