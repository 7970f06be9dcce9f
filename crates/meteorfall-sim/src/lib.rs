//! Simulation for METEORFALL.
//!
//! Wave orchestration, the countdown clock, the defense policy and the
//! economy, driven by a headless `SimulationEngine` that produces
//! `GameStateSnapshot`s at a fixed tick rate.

pub mod clock;
pub mod defense;
pub mod economy;
pub mod engine;
pub mod meteor_control;
pub mod orchestrator;
pub mod snapshot;

pub use engine::SimulationEngine;
pub use meteorfall_core as core;
pub use orchestrator::{WaveOrchestrator, WaveOrchestratorBuilder};
