//! Meteor agent for METEORFALL.
//!
//! Owns the single in-flight meteor: launch, flight along an eased path,
//! defense commands and their terminal animations, parking between waves.
//! Knows nothing about waves, timers or the shop.

pub mod agent;
pub mod animation;

pub use agent::{MeteorAgent, MeteorEvent, MeteorSettings, MeteorState, SpeedProfile};
pub use meteorfall_core as core;

#[cfg(test)]
mod tests;
