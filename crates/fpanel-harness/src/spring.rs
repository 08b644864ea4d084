#![forbid(unsafe_code)]

//! Damped spring used to simulate settle and removal animations.
//!
//! Models the surface's top edge as a unit mass on a damped spring:
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Springs are usually described by a damping ratio and a response (the
//! period of the undamped oscillation, in seconds); [`Spring::from_response`]
//! converts those into stiffness and damping.
//!
//! # Invariants
//!
//! 1. Stiffness is always at least [`MIN_STIFFNESS`]; damping is never negative.
//! 2. Once at rest, the position equals the target exactly and `advance`
//!    is a no-op.
//!
//! # Failure Modes
//!
//! - Large time steps are subdivided into [`MAX_STEP_SECS`] steps so stiff
//!   springs stay stable.
//! - Zero damping never comes to rest; callers bound their simulation loops.

use std::f64::consts::TAU;
use std::time::Duration;

/// Maximum integration step.
pub const MAX_STEP_SECS: f64 = 0.004;

/// Minimum stiffness to prevent degenerate springs.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Distance to target, in points, below which the spring may come to rest.
const REST_THRESHOLD: f64 = 0.1;

/// Speed, in points per second, below which the spring may come to rest.
const VELOCITY_THRESHOLD: f64 = 1.0;

/// A damped spring driving one coordinate toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring at `initial` heading for `target`, slightly underdamped.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            stiffness: 170.0,
            damping: 26.0,
            at_rest: initial == target,
        }
    }

    /// A spring with the given damping ratio and response period.
    #[must_use]
    pub fn from_response(initial: f64, target: f64, damping_ratio: f64, response: f64) -> Self {
        let response = response.max(0.01);
        let omega = TAU / response;
        Self::new(initial, target)
            .with_stiffness(omega * omega)
            .with_damping(2.0 * damping_ratio.max(0.0) * omega)
    }

    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Initial velocity in points per second. Wakes the spring.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self.at_rest = false;
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: velocity first, then position from the new velocity.
        let acceleration =
            -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }

        if (self.position - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.advance(MS_16);
        }
    }

    #[test]
    fn settles_on_target() {
        let mut spring = Spring::from_response(450.0, 18.0, 1.0, 0.3);
        simulate(&mut spring, 120);
        assert!(spring.is_at_rest(), "position: {}", spring.position());
        assert_eq!(spring.position(), 18.0);
    }

    #[test]
    fn critically_damped_does_not_overshoot() {
        let mut spring = Spring::from_response(0.0, 300.0, 1.0, 0.3);
        let mut max_pos = 0.0_f64;
        for _ in 0..200 {
            spring.advance(MS_16);
            max_pos = max_pos.max(spring.position());
        }
        assert!(max_pos <= 300.5, "overshoot: {max_pos}");
    }

    #[test]
    fn underdamped_overshoots() {
        let mut spring = Spring::from_response(0.0, 300.0, 0.3, 0.3);
        let mut max_pos = 0.0_f64;
        for _ in 0..200 {
            spring.advance(MS_16);
            max_pos = max_pos.max(spring.position());
        }
        assert!(max_pos > 310.0, "max: {max_pos}");
    }

    #[test]
    fn initial_velocity_moves_away_first() {
        let mut spring = Spring::from_response(200.0, 0.0, 1.0, 0.3).with_velocity(2000.0);
        spring.advance(MS_16);
        assert!(spring.position() > 200.0);
    }

    #[test]
    fn at_rest_when_starting_on_target() {
        let mut spring = Spring::new(42.0, 42.0);
        assert!(spring.is_at_rest());
        spring.advance(MS_16);
        assert_eq!(spring.position(), 42.0);
    }

    #[test]
    fn large_dt_is_stable() {
        let mut spring = Spring::from_response(0.0, 100.0, 0.8, 0.2);
        spring.advance(Duration::from_secs(5));
        assert!((spring.position() - 100.0).abs() < 1.0, "position: {}", spring.position());
    }
}
