//! Terminal animations played after a defense command.
//!
//! Each animation is plain `(kind, elapsed, duration)` state advanced by the
//! agent's per-tick step, so it can be cancelled at any point by a reset.

use std::f64::consts::TAU;

use glam::DVec3;

use meteorfall_core::constants::*;
use meteorfall_core::enums::NeutralizeKind;
use meteorfall_core::types::Position;

/// Pose of the meteor at one instant of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub position: Position,
    pub scale: f64,
    pub visible: bool,
}

/// An in-progress terminal animation.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalAnimation {
    pub kind: NeutralizeKind,
    pub elapsed_secs: f64,
    pub duration_secs: f64,
    /// Meteor position when the command arrived.
    pub origin: Position,
    /// Where the path-following kinds end up.
    pub destination: Position,
    pub start_scale: f64,
}

/// Fixed duration of each animation kind.
pub fn duration_for(kind: NeutralizeKind) -> f64 {
    match kind {
        NeutralizeKind::Destroy => DESTROY_ANIMATION_SECS,
        NeutralizeKind::Deflect => DEFLECT_ANIMATION_SECS,
        NeutralizeKind::Divert => DIVERT_ANIMATION_SECS,
        NeutralizeKind::PassThrough => PASS_THROUGH_ANIMATION_SECS,
    }
}

impl TerminalAnimation {
    /// Start an animation for a meteor at `origin` that was flying from
    /// `start` toward `target`.
    pub fn begin(
        kind: NeutralizeKind,
        origin: Position,
        start: Position,
        target: Position,
        start_scale: f64,
    ) -> Self {
        let destination = match kind {
            NeutralizeKind::Destroy | NeutralizeKind::Divert => origin,
            // Arc back out along the approach direction.
            NeutralizeKind::Deflect => {
                target + (start - target).normalize_or_zero() * DEFLECT_DISTANCE
            }
            // Mirror of the spawn point on the far side of the planet.
            NeutralizeKind::PassThrough => target + (target - start),
        };
        Self {
            kind,
            elapsed_secs: 0.0,
            duration_secs: duration_for(kind),
            origin,
            destination,
            start_scale,
        }
    }

    /// Fraction of the animation played (0.0 - 1.0).
    pub fn fraction(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }

    /// Advance by `dt` seconds. Returns true once the animation has finished.
    pub fn step(&mut self, dt: f64) -> bool {
        self.elapsed_secs += dt.max(0.0);
        self.is_finished()
    }

    /// Pose at the current fraction.
    pub fn frame(&self) -> AnimationFrame {
        let p = self.fraction();
        match self.kind {
            NeutralizeKind::Destroy => AnimationFrame {
                position: self.origin,
                scale: self.start_scale,
                visible: false,
            },
            NeutralizeKind::Deflect | NeutralizeKind::PassThrough => AnimationFrame {
                position: self.origin.lerp(self.destination, p),
                scale: self.start_scale,
                visible: true,
            },
            NeutralizeKind::Divert => {
                let angle = p * DIVERT_SPIRAL_TURNS * TAU;
                let radius = 1.0 - p;
                let offset = DVec3::new(
                    angle.cos() * radius,
                    angle.sin() * radius,
                    p * DIVERT_SPIRAL_DEPTH,
                );
                AnimationFrame {
                    position: self.origin + offset,
                    scale: self.start_scale * (1.0 - p),
                    visible: true,
                }
            }
        }
    }
}
