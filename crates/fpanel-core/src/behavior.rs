#![forbid(unsafe_code)]

//! Behavior policy: thresholds and animation timing.
//!
//! A [`Behavior`] decides how eager the panel is to change position or be
//! removed, and which [`Timing`] each kind of transition uses. The engine
//! clamps every threshold it reads, so a misconfigured policy degrades to
//! the nearest valid value instead of producing inverted comparisons.

use std::time::Duration;

use crate::error::{Result, ensure_finite};
use crate::geometry::Point;
use crate::position::Position;

/// Default relative velocity at which a drag toward the bottom removes the panel.
pub const DEFAULT_REMOVAL_VELOCITY: f64 = 10.0;

/// Default fraction of the way to the safe-area bottom that removes the panel.
pub const DEFAULT_REMOVAL_PROGRESS: f64 = 0.5;

/// Default fraction of the way between two positions past which the panel
/// snaps to the one it is moving toward.
pub const DEFAULT_REDIRECTIONAL_PROGRESS: f64 = 0.5;

/// Easing curve for time-based transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// How an animator should drive a transition.
///
/// Spring velocities are relative: `initial_velocity` is the fraction of
/// the total travel covered per second at the start of the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timing {
    Curve {
        duration: Duration,
        easing: Easing,
    },
    Spring {
        damping_ratio: f64,
        /// Approximate period of the undamped oscillation, in seconds.
        response: f64,
        initial_velocity: f64,
    },
}

/// Policy consulted by the interaction engine.
pub trait Behavior {
    /// Relative downward velocity that forces removal on its own.
    fn removal_velocity(&self) -> f64 {
        DEFAULT_REMOVAL_VELOCITY
    }

    /// Progress toward the safe-area bottom that triggers removal.
    fn removal_progress(&self) -> f64 {
        DEFAULT_REMOVAL_PROGRESS
    }

    /// Fraction of the distance `from → to` after which the panel commits to `to`.
    fn redirectional_progress(&self, _from: Position, _to: Position) -> f64 {
        DEFAULT_REDIRECTIONAL_PROGRESS
    }

    /// Timing for presenting the panel at `to`.
    fn add_timing(&self, to: Position) -> Timing;

    /// Timing for a programmatic move.
    fn move_timing(&self, from: Position, to: Position) -> Timing;

    /// Timing for a programmatic dismissal.
    fn remove_timing(&self, from: Position) -> Timing;

    /// Timing for settling after a drag. `velocity` is relative (see [`Timing`]).
    fn interaction_timing(&self, to: Position, velocity: Point) -> Timing;

    /// Timing for removal after a drag.
    fn removal_interaction_timing(&self, velocity: Point) -> Timing;
}

/// A configurable behavior with the stock thresholds and timings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DefaultBehavior {
    pub removal_velocity: f64,
    pub removal_progress: f64,
    pub redirectional_progress: f64,
    /// Duration of programmatic transitions, in milliseconds.
    pub transition_ms: u64,
    pub transition_easing: Easing,
    /// Spring response used for interaction and removal animations.
    pub spring_response: f64,
    /// Damping ratio for fast flings; slower releases are critically damped.
    pub fling_damping_ratio: f64,
    /// Relative velocity above which a release counts as a fling.
    pub fling_velocity_threshold: f64,
}

impl Default for DefaultBehavior {
    fn default() -> Self {
        Self {
            removal_velocity: DEFAULT_REMOVAL_VELOCITY,
            removal_progress: DEFAULT_REMOVAL_PROGRESS,
            redirectional_progress: DEFAULT_REDIRECTIONAL_PROGRESS,
            transition_ms: 250,
            transition_easing: Easing::EaseInOut,
            spring_response: 0.3,
            fling_damping_ratio: 0.7,
            fling_velocity_threshold: 8.0,
        }
    }
}

impl DefaultBehavior {
    /// Check every numeric field is finite and the spring is well formed.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("removal_velocity", self.removal_velocity)?;
        ensure_finite("removal_progress", self.removal_progress)?;
        ensure_finite("redirectional_progress", self.redirectional_progress)?;
        ensure_finite("spring_response", self.spring_response)?;
        ensure_finite("fling_damping_ratio", self.fling_damping_ratio)?;
        ensure_finite("fling_velocity_threshold", self.fling_velocity_threshold)
    }

    fn curve(&self) -> Timing {
        Timing::Curve {
            duration: Duration::from_millis(self.transition_ms),
            easing: self.transition_easing,
        }
    }

    fn damping_for(&self, velocity: Point) -> f64 {
        if velocity.y.abs() > self.fling_velocity_threshold {
            self.fling_damping_ratio
        } else {
            1.0
        }
    }
}

impl Behavior for DefaultBehavior {
    fn removal_velocity(&self) -> f64 {
        self.removal_velocity
    }

    fn removal_progress(&self) -> f64 {
        self.removal_progress
    }

    fn redirectional_progress(&self, _from: Position, _to: Position) -> f64 {
        self.redirectional_progress
    }

    fn add_timing(&self, _to: Position) -> Timing {
        self.curve()
    }

    fn move_timing(&self, _from: Position, _to: Position) -> Timing {
        self.curve()
    }

    fn remove_timing(&self, _from: Position) -> Timing {
        self.curve()
    }

    fn interaction_timing(&self, _to: Position, velocity: Point) -> Timing {
        Timing::Spring {
            damping_ratio: self.damping_for(velocity),
            response: self.spring_response,
            initial_velocity: velocity.y,
        }
    }

    fn removal_interaction_timing(&self, velocity: Point) -> Timing {
        Timing::Spring {
            damping_ratio: 1.0,
            response: self.spring_response,
            initial_velocity: velocity.y,
        }
    }
}
