//! Command-line options and configuration loading.

use std::path::PathBuf;

use clap::Parser;

use meteorfall_core::config::GameConfig;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "meteorfall.toml";

/// Defend the planet from one meteor per wave. Click for currency, buy
/// power-ups, survive.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file overriding any subset of the defaults.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// RNG seed for spawn point selection. Overrides the file.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Load the configuration file, then apply command-line overrides.
    ///
    /// A missing file silently means defaults. A file that cannot be read or
    /// parsed is reported and defaults are used. Values are not checked
    /// here; the engine reports invalid ones.
    pub fn load_config(&self) -> GameConfig {
        let path = &self.config;
        let mut config = if !path.exists() {
            log::info!("no {} found; using compiled defaults", path.display());
            GameConfig::default()
        } else {
            match GameConfig::load(path) {
                Ok(loaded) => {
                    log::info!("loaded config from {}", path.display());
                    loaded
                }
                Err(err) => {
                    log::warn!("{err}; using defaults");
                    GameConfig::default()
                }
            }
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}
