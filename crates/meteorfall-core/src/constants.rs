//! Simulation constants and tuning parameters.
//!
//! These are the authoritative defaults used by `GameConfig::default()`.

use glam::DVec3;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Waves ---

/// Countdown length of every wave (seconds).
pub const WAVE_DURATION_SECS: f64 = 20.0;

/// Pause between a successful defense and the next wave (seconds).
pub const WAVE_SUCCESS_PAUSE_SECS: f64 = 3.0;

/// Delay before the first wave of a run, and after a restart (seconds).
pub const WAVE_START_DELAY_SECS: f64 = 2.0;

/// Slack for accumulated frame time when deciding that a countdown has
/// expired or a journey is complete.
pub const TIME_EPSILON: f64 = 1e-9;

/// Wave number a fresh run starts at.
pub const FIRST_WAVE: u32 = 1;

// --- Countdown display thresholds (seconds remaining) ---

pub const COUNTDOWN_CRITICAL_SECS: f64 = 3.0;
pub const COUNTDOWN_HIGH_SECS: f64 = 5.0;
pub const COUNTDOWN_ELEVATED_SECS: f64 = 10.0;

// --- Planet ---

/// Planet center. Meteors always fly toward this point.
pub const PLANET_CENTER: DVec3 = DVec3::ZERO;

/// Largest dimension of the planet model (scene units).
pub const PLANET_EXTENT: f64 = 4.0;

// --- Meteor ---

/// Meteor scale on wave 1.
pub const METEOR_BASE_SCALE: f64 = 1.0;

/// Scale multiplier applied on wave 2.
pub const METEOR_WAVE2_SCALE_FACTOR: f64 = 1.3;

/// From wave 3 on, the meteor is sized to this fraction of the planet extent.
/// It is also the upper bound for every wave.
pub const METEOR_MAX_PLANET_RATIO: f64 = 0.9;

/// Where an idle meteor waits, out of the camera's view.
pub const METEOR_PARKING_POSITION: DVec3 = DVec3::new(100.0, 100.0, 100.0);

/// Journeys shorter than this are treated as already complete.
pub const MIN_JOURNEY_LENGTH: f64 = 1e-6;

/// Fixed set of spawn points surrounding the planet.
pub const SPAWN_POINTS: [DVec3; 6] = [
    DVec3::new(15.0, 5.0, 0.0),
    DVec3::new(-15.0, 5.0, 0.0),
    DVec3::new(0.0, 15.0, 5.0),
    DVec3::new(0.0, 15.0, -5.0),
    DVec3::new(10.0, 10.0, 10.0),
    DVec3::new(-10.0, 10.0, -10.0),
];

// --- Terminal animations ---

/// Laser kill: burst and vanish.
pub const DESTROY_ANIMATION_SECS: f64 = 0.6;

/// Shield bounce back along the approach direction.
pub const DEFLECT_ANIMATION_SECS: f64 = 1.0;

/// Distance past the planet center the deflected meteor is thrown back to.
pub const DEFLECT_DISTANCE: f64 = 10.0;

/// Wormhole spiral collapse.
pub const DIVERT_ANIMATION_SECS: f64 = 2.0;

/// Full turns completed by the wormhole spiral.
pub const DIVERT_SPIRAL_TURNS: f64 = 2.0;

/// Depth the wormhole spiral travels along +Z.
pub const DIVERT_SPIRAL_DEPTH: f64 = 5.0;

/// Meteor slips through the (temporarily absent) planet and out the far side.
pub const PASS_THROUGH_ANIMATION_SECS: f64 = 1.5;

// --- Economy ---

/// Currency gained per planet click before the multiplier.
pub const CLICK_VALUE: u64 = 1;

/// Click multiplier granted by the Click Multiplier power-up.
pub const CLICK_MULTIPLIER_BONUS: u32 = 5;

pub const COST_CLICK_MULTIPLIER: u64 = 10;
pub const COST_SHIELD: u64 = 50;
pub const COST_LASER: u64 = 300;
pub const COST_WORMHOLE: u64 = 2000;

// --- Last Chance ---

/// Evacuation ships launched by Last Chance.
pub const EVAC_SHIP_COUNT: usize = 8;

/// Ships appear on the upper half of a sphere this far from the planet center.
pub const EVAC_SPAWN_RADIUS: f64 = 1.5;

// --- Defense thresholds (highest wave each defense still works on) ---

pub const SHIELD_MAX_WAVE: u32 = 2;
pub const LASER_MAX_WAVE: u32 = 3;
pub const WORMHOLE_MAX_WAVE: u32 = 4;

// --- Misc ---

/// Default RNG seed for spawn point selection.
pub const DEFAULT_SEED: u64 = 42;
