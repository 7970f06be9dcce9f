use std::io::{self, BufRead};

use clap::Parser;

use meteorfall_app::cli::Cli;
use meteorfall_app::console::{self, ConsoleInput};
use meteorfall_app::game_loop;
use meteorfall_app::state::{AppState, GameLoopCommand};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.load_config();
    let state = AppState::new();

    let (cmd_tx, handle) = match game_loop::spawn_game_loop(config, state.latest_snapshot.clone())
    {
        Ok(spawned) => spawned,
        Err(err) => {
            log::error!("failed to start game loop: {err}");
            std::process::exit(1);
        }
    };

    println!("METEORFALL. Type `start` to begin, `help` for commands.");
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let command = match console::parse_line(&line) {
            Ok(Some(ConsoleInput::Command(command))) => command,
            Ok(Some(ConsoleInput::Status)) => {
                match state.latest() {
                    Some(snapshot) => println!("{}", console::format_status(&snapshot)),
                    None => println!("no snapshot yet"),
                }
                continue;
            }
            Ok(Some(ConsoleInput::Help)) => {
                println!("{}", console::HELP);
                continue;
            }
            Ok(Some(ConsoleInput::Quit)) => break,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("{err}");
                continue;
            }
        };
        if cmd_tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
            log::error!("game loop stopped unexpectedly");
            break;
        }
    }

    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
    if handle.join().is_err() {
        log::error!("game loop thread panicked");
    }
}
