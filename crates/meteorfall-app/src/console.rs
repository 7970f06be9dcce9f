//! Console line parsing and status formatting.

use std::fmt;

use meteorfall_core::commands::PlayerCommand;
use meteorfall_core::enums::PowerUpId;
use meteorfall_core::state::GameStateSnapshot;

pub const HELP: &str = "\
commands:
  start            begin the run
  click (c)        click the planet
  buy <item>       multiplier | shield | laser | wormhole
  use <item>       fire an owned laser or wormhole
  evacuate (e)     last chance: launch evacuation ships
  status (s)       show wave, countdown and balance
  pause / resume
  restart
  help
  quit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    Status,
    Help,
    Quit,
}

/// Why a console line was not understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    UnknownCommand(String),
    MissingItem(&'static str),
    UnknownItem(String),
    NotActivatable(PowerUpId),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::UnknownCommand(word) => {
                write!(f, "unknown command `{word}` (try `help`)")
            }
            ConsoleError::MissingItem(verb) => write!(f, "`{verb}` needs an item name"),
            ConsoleError::UnknownItem(name) => write!(f, "no such item `{name}`"),
            ConsoleError::NotActivatable(id) => {
                write!(f, "{} works on its own and cannot be used", id.name())
            }
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Parse a line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let input = match verb.to_ascii_lowercase().as_str() {
        "start" => ConsoleInput::Command(PlayerCommand::StartGame),
        "click" | "c" => ConsoleInput::Command(PlayerCommand::ClickPlanet),
        "buy" => ConsoleInput::Command(PlayerCommand::PurchasePowerUp {
            id: parse_item("buy", &rest)?,
        }),
        "use" => {
            let id = parse_item("use", &rest)?;
            if !id.is_activatable() {
                return Err(ConsoleError::NotActivatable(id));
            }
            ConsoleInput::Command(PlayerCommand::ActivatePowerUp { id })
        }
        "evacuate" | "evac" | "e" => ConsoleInput::Command(PlayerCommand::LaunchEvacuation),
        "restart" => ConsoleInput::Command(PlayerCommand::RestartGame),
        "pause" => ConsoleInput::Command(PlayerCommand::Pause),
        "resume" => ConsoleInput::Command(PlayerCommand::Resume),
        "status" | "s" => ConsoleInput::Status,
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" | "q" => ConsoleInput::Quit,
        _ => return Err(ConsoleError::UnknownCommand(verb.to_string())),
    };
    Ok(Some(input))
}

/// Item names may span several words ("click multiplier").
fn parse_item(verb: &'static str, words: &[&str]) -> Result<PowerUpId, ConsoleError> {
    if words.is_empty() {
        return Err(ConsoleError::MissingItem(verb));
    }
    let name = words.join(" ");
    PowerUpId::from_name(&name).ok_or(ConsoleError::UnknownItem(name))
}

/// Multi-line summary of a snapshot for `status`.
pub fn format_status(snapshot: &GameStateSnapshot) -> String {
    let wave = &snapshot.wave;
    let mut out = format!(
        "{:?} | wave {} ({:?})",
        snapshot.phase, wave.wave_number, wave.phase
    );
    if wave.running {
        out.push_str(&format!(
            " | {}s left [{:?}]",
            wave.seconds_remaining, wave.urgency
        ));
    }
    if let Some(secs) = wave.next_wave_in_secs {
        out.push_str(&format!(" | next wave in {secs:.1}s"));
    }
    if let Some(err) = &snapshot.config_error {
        out.push_str(&format!("\nconfiguration error: {err}"));
    }

    let economy = &snapshot.economy;
    out.push_str(&format!(
        "\nbalance {} (x{} per click)",
        economy.currency, economy.click_multiplier
    ));
    for item in &economy.power_ups {
        let mark = if item.purchased {
            "owned"
        } else if item.affordable {
            "buy"
        } else {
            "-"
        };
        out.push_str(&format!("\n  {:<16} {:>5}  {mark}", item.name, item.cost));
    }
    out
}
