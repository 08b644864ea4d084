#![forbid(unsafe_code)]

//! Scenario driver wiring a [`Panel`] to simulated collaborators.
//!
//! A [`Rig`] owns the panel together with a [`SimSurface`], a
//! [`SimAnimator`], a [`RecordingDelegate`] and an optional [`SimScroll`].
//! Tests feed it drag samples and frames; the rig builds a [`Host`] for
//! every call and delivers animation completions back to the panel.
//!
//! Grabbing the panel while an animation runs stops the animator the way a
//! host would. The resulting completion reaches the panel on the next frame
//! and is ignored as stale.

use std::time::Duration;

use fpanel_core::{
    AnimationId, Behavior, Completion, DragEvent, DragPhase, Host, InteractionPhase, LayoutAdapter,
    PanSample, Panel, Point, Position, Result, Surface,
};
use fpanel_core::host::GRABBER_BAR_HEIGHT;

use crate::animator::SimAnimator;
use crate::delegate::RecordingDelegate;
use crate::surface::{SimScroll, SimSurface};

/// Duration of one simulated frame.
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames simulated by [`Rig::run_until_idle`].
pub const MAX_FRAMES: usize = 1_000;

/// Width of the simulated surface.
pub const SURFACE_WIDTH: f64 = 375.0;

/// A panel with simulated collaborators.
#[derive(Debug)]
pub struct Rig<L, B> {
    pub panel: Panel<L, B>,
    pub surface: SimSurface,
    pub animator: SimAnimator,
    pub delegate: RecordingDelegate,
    pub scroll: Option<SimScroll>,
    touch: Point,
}

impl<L: LayoutAdapter, B: Behavior> Rig<L, B> {
    /// A rig whose surface rests at the layout's initial position.
    pub fn new(layout: L, behavior: B) -> Result<Self> {
        let panel = Panel::new(layout, behavior)?;
        let layout = panel.layout();
        let initial = layout.initial_position();
        let mut surface =
            SimSurface::new(SURFACE_WIDTH, layout.hidden_y(), layout.position_y(initial));
        surface.set_backdrop_alpha(layout.backdrop_alpha(initial));
        Ok(Self {
            panel,
            surface,
            animator: SimAnimator::new(),
            delegate: RecordingDelegate::new(),
            scroll: None,
            touch: Point::new(SURFACE_WIDTH / 2.0, GRABBER_BAR_HEIGHT),
        })
    }

    /// Embed a child scroll view.
    #[must_use]
    pub fn with_scroll(mut self, scroll: SimScroll) -> Self {
        self.panel.attach_scroll(&scroll);
        self.scroll = Some(scroll);
        self
    }

    /// Enable removal by dragging.
    #[must_use]
    pub fn removable(mut self) -> Self {
        self.panel.set_removal_interaction_enabled(true);
        self
    }

    /// Where subsequent pan samples touch the surface, in surface coordinates.
    ///
    /// Defaults to the grabber bar.
    pub fn touch_at(&mut self, location: Point) {
        self.touch = location;
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.panel.position()
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.panel.phase()
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.surface.y()
    }

    fn with_host<R>(&mut self, f: impl FnOnce(&mut Panel<L, B>, &mut Host<'_>) -> R) -> R {
        let Self {
            panel,
            surface,
            animator,
            delegate,
            scroll,
            ..
        } = self;
        let mut host = Host::new(surface, animator).with_delegate(delegate);
        if let Some(scroll) = scroll.as_mut() {
            host = host.with_scroll(scroll);
        }
        f(panel, &mut host)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Feed one panel drag sample at the current touch location.
    pub fn pan(&mut self, phase: DragPhase, translation_y: f64, velocity_y: f64) {
        let sample = PanSample::new(
            phase,
            Point::vertical(translation_y),
            Point::vertical(velocity_y),
        )
        .at(self.touch);
        self.with_host(|panel, host| panel.handle(DragEvent::FromPanel(sample), host));

        if self.panel.phase() == InteractionPhase::Dragging && self.animator.running().is_some() {
            self.animator.interrupt();
        }
    }

    /// Began, one Changed per translation, then Ended at the last
    /// translation with `release_velocity_y`.
    pub fn drag(&mut self, translations: &[f64], release_velocity_y: f64) {
        self.pan(DragPhase::Began, 0.0, 0.0);
        for &translation_y in translations {
            self.pan(DragPhase::Changed, translation_y, 0.0);
        }
        let last = translations.last().copied().unwrap_or(0.0);
        self.pan(DragPhase::Ended, last, release_velocity_y);
    }

    /// Feed a drag update of the child scroll view.
    pub fn scroll_drag(&mut self, phase: DragPhase) {
        self.with_host(|panel, host| panel.handle(DragEvent::FromChildScroll(phase), host));
    }

    /// The child scroll is about to decelerate; returns the panel's override.
    pub fn scroll_will_end_dragging(&mut self) -> Option<Point> {
        let scroll = self.scroll.as_ref()?;
        self.panel.scroll_will_end_dragging(scroll)
    }

    // -----------------------------------------------------------------------
    // Programmatic transitions
    // -----------------------------------------------------------------------

    pub fn present(&mut self, animated: bool) -> Option<AnimationId> {
        self.surface.reattach();
        self.with_host(|panel, host| panel.present(animated, host))
    }

    pub fn move_to(&mut self, to: Position, animated: bool) -> Result<Option<AnimationId>> {
        self.with_host(|panel, host| panel.move_to(to, animated, host))
    }

    pub fn dismiss(&mut self, animated: bool) -> Result<Option<AnimationId>> {
        self.with_host(|panel, host| panel.dismiss(animated, host))
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Advance one frame of `dt` and deliver any completions.
    pub fn tick(&mut self, dt: Duration) -> Vec<Completion> {
        let reports = self.animator.tick(dt, &mut self.surface);
        reports
            .into_iter()
            .map(|(id, status)| {
                let completion =
                    self.with_host(|panel, host| panel.animation_did_complete(id, status, host));
                tracing::trace!(message = "rig.completion", id = id.0, ?status, ?completion);
                completion
            })
            .collect()
    }

    /// Run frames until the animator has nothing left to do.
    pub fn run_until_idle(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        for _ in 0..MAX_FRAMES {
            if self.animator.is_idle() {
                break;
            }
            completions.extend(self.tick(FRAME));
        }
        completions
    }
}
