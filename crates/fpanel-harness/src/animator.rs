#![forbid(unsafe_code)]

//! Frame-stepped animator.
//!
//! [`SimAnimator`] runs the panel's [`AnimationRequest`]s against a
//! [`SimSurface`] one frame at a time. Curve timings interpolate with their
//! easing; spring timings integrate a [`Spring`] whose initial velocity is
//! the request's relative velocity scaled by the travel distance.
//!
//! # Invariants
//!
//! 1. At most one animation runs. Starting another interrupts the running
//!    one, and its completion is reported as [`AnimationStatus::Interrupted`].
//! 2. Every started animation is reported exactly once.
//! 3. A finished animation leaves the surface exactly at its target.

use std::time::Duration;

use fpanel_core::{AnimationId, AnimationRequest, AnimationStatus, Animator, Easing, Surface, Timing};

use crate::spring::Spring;
use crate::surface::SimSurface;

#[derive(Debug, Clone)]
enum Motion {
    Curve {
        elapsed: Duration,
        duration: Duration,
        easing: Easing,
    },
    Spring(Spring),
}

#[derive(Debug, Clone)]
struct Track {
    request: AnimationRequest,
    from_y: f64,
    from_alpha: f64,
    motion: Motion,
}

impl Track {
    fn begin(request: AnimationRequest, surface: &SimSurface) -> Self {
        let from_y = surface.y();
        let motion = match request.timing {
            Timing::Curve { duration, easing } => Motion::Curve {
                elapsed: Duration::ZERO,
                duration,
                easing,
            },
            Timing::Spring {
                damping_ratio,
                response,
                initial_velocity,
            } => {
                let travel = (request.target_y - from_y).abs();
                Motion::Spring(
                    Spring::from_response(from_y, request.target_y, damping_ratio, response)
                        .with_velocity(initial_velocity * travel),
                )
            }
        };
        Self {
            request,
            from_y,
            from_alpha: surface.backdrop_alpha(),
            motion,
        }
    }

    /// Advance and apply one frame. Returns true once finished.
    fn advance(&mut self, dt: Duration, surface: &mut SimSurface) -> bool {
        let target_y = self.request.target_y;
        let (y, progress, done) = match &mut self.motion {
            Motion::Curve {
                elapsed,
                duration,
                easing,
            } => {
                *elapsed += dt;
                let t = if duration.is_zero() {
                    1.0
                } else {
                    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
                };
                let eased = easing.apply(t);
                (self.from_y + (target_y - self.from_y) * eased, eased, t >= 1.0)
            }
            Motion::Spring(spring) => {
                spring.advance(dt);
                let y = spring.position();
                let travel = target_y - self.from_y;
                let progress = if travel == 0.0 {
                    1.0
                } else {
                    ((y - self.from_y) / travel).clamp(0.0, 1.0)
                };
                (y, progress, spring.is_at_rest())
            }
        };

        let target_alpha = self.request.target_alpha;
        let (y, alpha) = if done {
            (target_y, target_alpha)
        } else {
            (y, self.from_alpha + (target_alpha - self.from_alpha) * progress)
        };
        surface.set_frame(surface.frame().with_origin_y(y));
        surface.set_backdrop_alpha(alpha);
        done
    }
}

/// Runs panel animations frame by frame.
///
/// Requests are queued by [`Animator::start_animation`] and picked up on
/// the next [`tick`](Self::tick), which also returns the completions the
/// panel should be told about.
#[derive(Debug, Default)]
pub struct SimAnimator {
    queued: Option<AnimationRequest>,
    active: Option<Track>,
    reports: Vec<(AnimationId, AnimationStatus)>,
    started: Vec<AnimationRequest>,
}

impl SimAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received, oldest first.
    #[must_use]
    pub fn started(&self) -> &[AnimationRequest] {
        &self.started
    }

    #[must_use]
    pub fn last_started(&self) -> Option<&AnimationRequest> {
        self.started.last()
    }

    /// Whether nothing runs and no completion awaits delivery.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queued.is_none() && self.active.is_none() && self.reports.is_empty()
    }

    /// The id of the running or queued animation.
    #[must_use]
    pub fn running(&self) -> Option<AnimationId> {
        self.queued
            .map(|request| request.id)
            .or_else(|| self.active.as_ref().map(|track| track.request.id))
    }

    /// Stop whatever runs, leaving the surface where it is.
    pub fn interrupt(&mut self) {
        let running = self
            .queued
            .take()
            .map(|request| request.id)
            .into_iter()
            .chain(self.active.take().map(|track| track.request.id));
        for id in running {
            tracing::trace!(message = "animator.interrupt", id = id.0);
            self.reports.push((id, AnimationStatus::Interrupted));
        }
    }

    /// Advance one frame. Returns the completions produced, in order.
    pub fn tick(
        &mut self,
        dt: Duration,
        surface: &mut SimSurface,
    ) -> Vec<(AnimationId, AnimationStatus)> {
        if let Some(request) = self.queued.take() {
            self.active = Some(Track::begin(request, surface));
        }

        let finished = self
            .active
            .as_mut()
            .and_then(|track| track.advance(dt, surface).then_some(track.request.id));
        if let Some(id) = finished {
            tracing::trace!(message = "animator.finish", id = id.0, y = surface.y());
            self.active = None;
            self.reports.push((id, AnimationStatus::Finished));
        }

        std::mem::take(&mut self.reports)
    }
}

impl Animator for SimAnimator {
    fn start_animation(&mut self, request: AnimationRequest) {
        self.interrupt();
        tracing::debug!(
            message = "animator.start",
            id = request.id.0,
            kind = ?request.kind,
            target_y = request.target_y,
            interruptible = request.interruptible
        );
        self.started.push(request);
        self.queued = Some(request);
    }
}
