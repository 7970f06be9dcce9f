//! Runtime configuration, optionally loaded from a TOML file.
//!
//! [`GameConfig`] mirrors the defaults in [`crate::constants`]. Every section
//! is `#[serde(default)]`, so a file only needs the keys it overrides:
//!
//! ```toml
//! seed = 7
//!
//! [wave]
//! duration_secs = 15.0
//!
//! [meteor]
//! easing = { kind = "ease_in" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::PowerUpId;
use crate::error::ConfigError;
use crate::types::{EasingCurve, Position};

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for spawn point selection. Same seed = same run.
    pub seed: u64,
    /// Candidate meteor spawn points; one is picked uniformly per wave.
    pub spawn_points: Vec<Position>,
    pub wave: WaveConfig,
    pub meteor: MeteorConfig,
    pub planet: PlanetConfig,
    pub power_ups: PowerUpCosts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Countdown length, constant for every wave.
    pub duration_secs: f64,
    /// Pause after a successful defense before the next wave.
    pub success_pause_secs: f64,
    /// Delay before the first wave of a run.
    pub start_delay_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    /// Scale on wave 1, restored on every reset.
    pub base_scale: f64,
    /// Fixed flight speed (units/s). When absent the meteor is timed to
    /// arrive exactly when the wave countdown expires.
    pub speed: Option<f64>,
    /// Progress-to-path curve.
    pub easing: EasingCurve,
    /// Off-scene point where an idle meteor waits.
    pub parking_position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    pub center: Position,
    /// Largest dimension of the planet.
    pub extent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpCosts {
    pub click_multiplier: u64,
    pub shield: u64,
    pub laser: u64,
    pub wormhole: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            spawn_points: SPAWN_POINTS.to_vec(),
            wave: WaveConfig::default(),
            meteor: MeteorConfig::default(),
            planet: PlanetConfig::default(),
            power_ups: PowerUpCosts::default(),
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            duration_secs: WAVE_DURATION_SECS,
            success_pause_secs: WAVE_SUCCESS_PAUSE_SECS,
            start_delay_secs: WAVE_START_DELAY_SECS,
        }
    }
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            base_scale: METEOR_BASE_SCALE,
            speed: None,
            easing: EasingCurve::Linear,
            parking_position: METEOR_PARKING_POSITION,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            center: PLANET_CENTER,
            extent: PLANET_EXTENT,
        }
    }
}

impl Default for PowerUpCosts {
    fn default() -> Self {
        Self {
            click_multiplier: COST_CLICK_MULTIPLIER,
            shield: COST_SHIELD,
            laser: COST_LASER,
            wormhole: COST_WORMHOLE,
        }
    }
}

impl PowerUpCosts {
    pub fn cost(&self, id: PowerUpId) -> u64 {
        match id {
            PowerUpId::ClickMultiplier => self.click_multiplier,
            PowerUpId::Shield => self.shield,
            PowerUpId::Laser => self.laser,
            PowerUpId::Wormhole => self.wormhole,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document. Values are checked later, by
    /// [`GameConfig::validate`], when the simulation is wired.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the wave core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_points.is_empty() {
            return Err(ConfigError::NoSpawnPoints);
        }
        require_positive("wave.duration_secs", self.wave.duration_secs)?;
        require_positive("wave.success_pause_secs", self.wave.success_pause_secs)?;
        require_positive("wave.start_delay_secs", self.wave.start_delay_secs)?;
        require_positive("meteor.base_scale", self.meteor.base_scale)?;
        require_positive("planet.extent", self.planet.extent)?;
        if let Some(speed) = self.meteor.speed {
            require_positive("meteor.speed", speed)?;
        }
        self.meteor
            .easing
            .validate()
            .map_err(ConfigError::InvalidEasingCurve)?;
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails this check too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
