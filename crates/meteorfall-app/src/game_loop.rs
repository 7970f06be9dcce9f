//! Game loop thread — runs the simulation engine at 30Hz.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via an `mpsc` channel; signals are logged as they are emitted and
//! the latest snapshot is stored for the console to query.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use meteorfall_core::config::GameConfig;
use meteorfall_core::constants::{COUNTDOWN_ELEVATED_SECS, TICK_RATE};
use meteorfall_core::events::GameSignal;
use meteorfall_core::state::GameStateSnapshot;
use meteorfall_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: GameConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("meteorfall-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: GameConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Report what happened
        for signal in &snapshot.signals {
            report_signal(signal);
        }

        // 4. Store latest snapshot for `status`
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// One human-readable line per signal.
pub fn describe_signal(signal: &GameSignal) -> String {
    match signal {
        GameSignal::WaveStarted { wave_number } => {
            format!("Wave {wave_number} incoming!")
        }
        GameSignal::TimerTick { seconds_remaining } => format!("{seconds_remaining}s"),
        GameSignal::MeteorImpacted => "The meteor hit the planet.".into(),
        GameSignal::MeteorNeutralized { outcome } => format!("Meteor {outcome:?}."),
        GameSignal::WaveSucceeded { new_wave_number } => {
            format!("Planet saved! Next up: wave {new_wave_number}.")
        }
        GameSignal::GameOver { wave_number } => {
            format!("GAME OVER on wave {wave_number}. Type `restart` to try again.")
        }
        GameSignal::EvacuationLaunched { ships } => {
            format!("Last chance! {} evacuation ships away.", ships.len())
        }
        GameSignal::Restarted => "Restarted from wave 1.".into(),
        GameSignal::CurrencyChanged { balance } => format!("Balance: {balance}"),
        GameSignal::PowerUpPurchased { id } => format!("Bought {}.", id.name()),
        GameSignal::PurchaseRejected { id, reason } => {
            format!("Can't buy {}: {reason}.", id.name())
        }
    }
}

fn report_signal(signal: &GameSignal) {
    let line = describe_signal(signal);
    match signal {
        // Clicks and the early countdown are noisy.
        GameSignal::CurrencyChanged { .. } => log::debug!("{line}"),
        GameSignal::TimerTick { seconds_remaining }
            if f64::from(*seconds_remaining) > COUNTDOWN_ELEVATED_SECS =>
        {
            log::debug!("{line}")
        }
        _ => log::info!("{line}"),
    }
}
