//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::DVec3;

/// 3D point in scene space. The planet sits at the origin unless configured
/// otherwise.
pub type Position = DVec3;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Monotonic curve mapping journey progress (0..=1) to path fraction (0..=1).
///
/// TOML form: `easing = { kind = "ease_in" }` or
/// `easing = { kind = "keyframes", keys = [[0.0, 0.0], [0.5, 0.2], [1.0, 1.0]] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "keys", rename_all = "snake_case")]
pub enum EasingCurve {
    #[default]
    Linear,
    /// Quadratic acceleration (slow start, fast arrival).
    EaseIn,
    /// Quadratic deceleration.
    EaseOut,
    SmoothStep,
    /// Piecewise-linear curve through `[progress, fraction]` keys.
    Keyframes(Vec<[f64; 2]>),
}

impl EasingCurve {
    /// Evaluate the curve at `t`. Input is clamped to [0, 1].
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => t,
            EasingCurve::EaseIn => t * t,
            EasingCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
            EasingCurve::Keyframes(keys) => evaluate_keyframes(keys, t),
        }
    }

    /// Check that the curve is monotonic and pinned at (0,0) and (1,1).
    pub fn validate(&self) -> Result<(), String> {
        let EasingCurve::Keyframes(keys) = self else {
            return Ok(());
        };
        if keys.len() < 2 {
            return Err(format!("need at least 2 keys, got {}", keys.len()));
        }
        let first = keys[0];
        let last = keys[keys.len() - 1];
        if first != [0.0, 0.0] {
            return Err(format!("first key must be [0, 0], got {first:?}"));
        }
        if last != [1.0, 1.0] {
            return Err(format!("last key must be [1, 1], got {last:?}"));
        }
        for pair in keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b[0] <= a[0] {
                return Err(format!("key progress must increase: {a:?} then {b:?}"));
            }
            if b[1] < a[1] {
                return Err(format!("curve must not decrease: {a:?} then {b:?}"));
            }
        }
        Ok(())
    }
}

fn evaluate_keyframes(keys: &[[f64; 2]], t: f64) -> f64 {
    let Some(first) = keys.first() else {
        return t;
    };
    if t <= first[0] {
        return first[1];
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b[0] {
            let span = b[0] - a[0];
            if span <= f64::EPSILON {
                return b[1];
            }
            return a[1] + (b[1] - a[1]) * (t - a[0]) / span;
        }
    }
    keys[keys.len() - 1][1]
}
