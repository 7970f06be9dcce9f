//! METEORFALL terminal driver.
//!
//! Runs the simulation engine on its own thread at the fixed tick rate and
//! feeds it commands typed on stdin. Every signal the engine emits is logged.

pub mod cli;
pub mod console;
pub mod game_loop;
pub mod state;

pub use meteorfall_core as core;
