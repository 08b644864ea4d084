#![forbid(unsafe_code)]

//! Interaction state machine.
//!
//! [`Panel`] turns tagged drag events into surface updates, settle
//! animations and removals. It owns the [`LayoutState`] and the
//! [`ScrollViewState`]; every collaborator is borrowed through a [`Host`]
//! for the duration of a single call.
//!
//! # State Machine
//!
//! ```text
//!            Changed               Ended (no removal)         Finished
//!   Idle ──────────────▶ Dragging ───────────────────▶ Settling ───────▶ Idle
//!     ▲                     │                             │
//!     │ present/move/dismiss│ Ended (removal accepted)    │ Changed
//!   Moving                  ▼                             ▼
//!                        Removing ──────▶ Removed      Dragging
//! ```
//!
//! # Invariants
//!
//! 1. `state` changes only when a drag ends or a programmatic transition is
//!    requested, never while a drag is live.
//! 2. At most one animation is active. Starting a drag or a new transition
//!    supersedes it, and its completion is then ignored.
//! 3. Once removal starts, drag events are ignored until the panel is
//!    presented again.
//!
//! # Failure Modes
//!
//! - A stale completion (an id other than the active one) is ignored.
//! - An interrupted settle animation leaves the panel idle without the
//!   `did_end_decelerating` hook.

use crate::behavior::Behavior;
use crate::error::{PanelError, Result};
use crate::event::{DragEvent, DragPhase, PanSample};
use crate::geometry::{Point, Rect};
use crate::host::{AnimationId, AnimationKind, AnimationRequest, AnimationStatus, ChildScroll, Host};
use crate::kinematics::{self, Bounds, DragSample, RemovalInput};
use crate::layout::{LayoutAdapter, validate_layout};
use crate::position::Position;
use crate::scroll;
use crate::state::{LayoutState, ScrollViewState};

/// Observable phase of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Dragging,
    Settling,
    Moving,
    Removing,
    Removed,
}

/// What an accepted animation completion meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A drag finished settling at the position.
    Settled(Position),
    /// A programmatic transition finished; `None` means dismissed.
    Moved(Option<Position>),
    /// The panel was removed after a drag.
    Removed,
    /// The active animation was interrupted before finishing.
    Interrupted,
    /// The completion belonged to a superseded animation.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activity {
    Idle,
    Settling { id: AnimationId, to: Position },
    Moving { id: AnimationId, to: Option<Position> },
    Removing { id: AnimationId },
    Removed,
}

impl Activity {
    fn animation(self) -> Option<AnimationId> {
        match self {
            Self::Settling { id, .. } | Self::Moving { id, .. } | Self::Removing { id } => Some(id),
            Self::Idle | Self::Removed => None,
        }
    }
}

/// A draggable multi-position panel.
#[derive(Debug)]
pub struct Panel<L, B> {
    layout: L,
    behavior: B,
    layout_state: LayoutState,
    scroll_state: ScrollViewState,
    scroll_attached: bool,
    activity: Activity,
    next_animation: u64,
}

impl<L: LayoutAdapter, B: Behavior> Panel<L, B> {
    /// Create a panel resting at the layout's initial position.
    ///
    /// Fails if the layout supports no positions, starts at an unsupported
    /// position, or reports an invalid backdrop alpha.
    pub fn new(layout: L, behavior: B) -> Result<Self> {
        validate_layout(&layout)?;
        let layout_state = LayoutState::new(layout.initial_position());
        Ok(Self {
            layout,
            behavior,
            layout_state,
            scroll_state: ScrollViewState::default(),
            scroll_attached: false,
            activity: Activity::Idle,
            next_animation: 0,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    #[inline]
    #[must_use]
    pub fn layout_state(&self) -> &LayoutState {
        &self.layout_state
    }

    #[inline]
    #[must_use]
    pub fn scroll_state(&self) -> &ScrollViewState {
        &self.scroll_state
    }

    /// The settled (or settling-toward) position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.layout_state.state
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        if self.layout_state.interaction_in_progress {
            return InteractionPhase::Dragging;
        }
        match self.activity {
            Activity::Idle => InteractionPhase::Idle,
            Activity::Settling { .. } => InteractionPhase::Settling,
            Activity::Moving { .. } => InteractionPhase::Moving,
            Activity::Removing { .. } => InteractionPhase::Removing,
            Activity::Removed => InteractionPhase::Removed,
        }
    }

    /// The animation whose completion is currently awaited.
    #[must_use]
    pub fn active_animation(&self) -> Option<AnimationId> {
        self.activity.animation()
    }

    pub fn set_removal_interaction_enabled(&mut self, enabled: bool) {
        self.layout_state.is_removal_interaction_enabled = enabled;
    }

    /// Start coordinating with a child scroll; remembers its indicator state.
    ///
    /// Optional: a scroll first seen through a [`Host`] is recorded before
    /// the panel locks it.
    pub fn attach_scroll(&mut self, scroll: &dyn ChildScroll) {
        self.scroll_state.scroll_indicators_visible = scroll.shows_vertical_indicator();
        self.scroll_attached = true;
    }

    // -----------------------------------------------------------------------
    // Drag events
    // -----------------------------------------------------------------------

    /// Feed one gesture update.
    pub fn handle(&mut self, event: DragEvent, host: &mut Host<'_>) {
        if matches!(self.activity, Activity::Removing { .. } | Activity::Removed) {
            return;
        }
        match event {
            DragEvent::FromChildScroll(_) => {
                let frame = host.surface.frame();
                let top_y = self.layout.top_y();
                if let Some(child) = host.scroll.as_deref_mut() {
                    scroll::will_update(child, frame, top_y, &self.layout_state);
                }
            }
            DragEvent::FromPanel(sample) => {
                if self.yields_to_child_scroll(&sample, host) {
                    return;
                }
                match sample.phase {
                    DragPhase::Changed => self.on_changed(&sample, host),
                    phase if phase.is_terminal() => self.on_ended(&sample, host),
                    // A drag may also start from content scrolling, so Began
                    // carries no information.
                    _ => {}
                }
            }
        }
    }

    fn yields_to_child_scroll(&self, sample: &PanSample, host: &Host<'_>) -> bool {
        let grabber = host.surface.grabber_area();
        host.scroll.as_deref().is_some_and(|child| {
            scroll::should_yield_to_child_scroll(child, sample, &self.layout_state, grabber)
        })
    }

    fn on_changed(&mut self, sample: &PanSample, host: &mut Host<'_>) {
        if !self.layout_state.interaction_in_progress {
            self.start_interaction(sample.translation, host);
        }

        let current_y = self.current_y(sample, host.surface.frame());
        let frame = self.layout_state.initial_frame.with_origin_y(current_y);
        host.surface.set_frame(frame);
        let alpha = kinematics::backdrop_alpha(
            &self.layout,
            self.layout_state.state,
            sample.translation.y,
            current_y,
        );
        host.surface.set_backdrop_alpha(alpha);

        host.notify(|d| d.did_move());
    }

    fn on_ended(&mut self, sample: &PanSample, host: &mut Host<'_>) {
        let frame = host.surface.frame();
        if !self.layout_state.interaction_in_progress {
            self.layout_state.initial_frame = frame;
            self.layout_state.translation_offset = 0.0;
        }

        // Suppress the child's momentum unless the panel ends fully open.
        self.scroll_state.stop_deceleration = frame.min_y() > self.layout.top_y();

        let current_y = self.current_y(sample, frame);
        let target = kinematics::target_position(
            &self.layout,
            &self.behavior,
            self.layout_state.state,
            current_y,
            sample.velocity.y,
        );
        let distance = kinematics::distance(&self.layout, target, current_y);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.drag.end",
            from = %self.layout_state.state,
            to = %target,
            current_y,
            distance,
            velocity_y = sample.velocity.y
        );

        self.end_interaction(target, host);

        if self.layout_state.is_removal_interaction_enabled
            && self
                .layout_state
                .is_bottom_state(self.layout.supported_positions())
            && self.start_removal(sample.velocity, current_y, distance, host)
        {
            return;
        }

        host.notify(|d| d.did_end_dragging(sample.velocity, target));
        host.notify(|d| d.will_begin_decelerating());

        self.start_settle(target, distance, sample.velocity, host);
    }

    fn current_y(&self, sample: &PanSample, frame: Rect) -> f64 {
        let drag = DragSample {
            initial_origin_y: self.layout_state.initial_frame.min_y(),
            translation_y: sample.translation.y,
            translation_offset: self.layout_state.translation_offset,
            previous_origin_y: frame.min_y(),
            is_drag_live: sample.phase == DragPhase::Changed,
        };
        kinematics::current_coordinate(&drag, &Bounds::of(&self.layout))
    }

    fn start_interaction(&mut self, translation: Point, host: &mut Host<'_>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.drag.start",
            state = %self.layout_state.state,
            superseded = ?self.activity.animation()
        );

        // Any in-flight animation is abandoned; its completion becomes stale.
        self.activity = Activity::Idle;

        self.layout_state.initial_frame = host.surface.frame();
        if let Some(child) = host.scroll.as_deref() {
            self.layout_state.initial_scroll_offset = child.content_offset();
        }
        self.layout_state.translation_offset = translation.y;
        host.notify(|d| d.will_begin_dragging());

        self.lock_scroll(host);
        self.layout_state.interaction_in_progress = true;
    }

    fn end_interaction(&mut self, target: Position, host: &mut Host<'_>) {
        if target != Position::Full {
            self.lock_scroll(host);
        }
        self.layout_state.interaction_in_progress = false;
    }

    fn start_removal(
        &mut self,
        velocity: Point,
        current_y: f64,
        distance: f64,
        host: &mut Host<'_>,
    ) -> bool {
        let input = RemovalInput {
            settled_y: self.layout.position_y(self.layout_state.state),
            current_y,
            safe_area_bottom_y: self.layout.safe_area_bottom_y(),
            velocity_y: velocity.y,
            distance,
            velocity_threshold: self.behavior.removal_velocity(),
            progress_threshold: self.behavior.removal_progress(),
        };
        let Some(dy) = kinematics::removal_velocity(&input) else {
            return false;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.remove.start", current_y, relative_velocity = dy);

        host.notify(|d| d.did_end_dragging_to_remove(velocity));
        let id = self.issue_animation();
        host.animator.start_animation(AnimationRequest {
            id,
            kind: AnimationKind::RemovalInteraction,
            target_y: self.layout.hidden_y(),
            target_alpha: 0.0,
            timing: self
                .behavior
                .removal_interaction_timing(Point::vertical(dy)),
            interruptible: true,
        });
        self.activity = Activity::Removing { id };
        true
    }

    fn start_settle(
        &mut self,
        target: Position,
        distance: f64,
        velocity: Point,
        host: &mut Host<'_>,
    ) {
        let relative = Point::vertical(kinematics::settle_velocity(velocity.y, distance));
        let id = self.issue_animation();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.settle.start",
            id = id.0,
            to = %target,
            relative_velocity = relative.y
        );

        host.animator.start_animation(AnimationRequest {
            id,
            kind: AnimationKind::Interaction { to: target },
            target_y: self.layout.position_y(target),
            target_alpha: self.layout.backdrop_alpha(target),
            timing: self.behavior.interaction_timing(target, relative),
            // An interrupted settle would leave the backdrop mid-fade.
            interruptible: false,
        });
        self.layout_state.state = target;
        self.activity = Activity::Settling { id, to: target };
    }

    // -----------------------------------------------------------------------
    // Animation completion
    // -----------------------------------------------------------------------

    /// Report that an animation requested by this panel ended.
    ///
    /// Completions of superseded animations are ignored and reported as
    /// [`Completion::Stale`].
    pub fn animation_did_complete(
        &mut self,
        id: AnimationId,
        status: AnimationStatus,
        host: &mut Host<'_>,
    ) -> Completion {
        if self.activity.animation() != Some(id) || self.layout_state.interaction_in_progress {
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "panel.animation.stale", id = id.0);
            return Completion::Stale;
        }

        match self.activity {
            Activity::Removing { .. } => {
                self.activity = Activity::Removed;
                host.surface.remove_from_parent();
                host.notify(|d| d.did_end_remove());
                Completion::Removed
            }
            _ if status == AnimationStatus::Interrupted => {
                self.activity = Activity::Idle;
                Completion::Interrupted
            }
            Activity::Settling { to, .. } => {
                self.finish_settle(host);
                Completion::Settled(to)
            }
            Activity::Moving { to, .. } => {
                self.activity = Activity::Idle;
                Completion::Moved(to)
            }
            Activity::Idle | Activity::Removed => Completion::Stale,
        }
    }

    fn finish_settle(&mut self, host: &mut Host<'_>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.settle.finish", state = %self.layout_state.state);

        self.activity = Activity::Idle;
        host.notify(|d| d.did_end_decelerating());
        self.scroll_state.stop_deceleration = false;
        self.unlock_scroll(host);
    }

    // -----------------------------------------------------------------------
    // Programmatic transitions
    // -----------------------------------------------------------------------

    /// Show the panel at the layout's initial position.
    pub fn present(&mut self, animated: bool, host: &mut Host<'_>) -> Option<AnimationId> {
        let to = self.layout.initial_position();
        self.layout_state.interaction_in_progress = false;
        self.activity = Activity::Idle;
        self.transition(None, Some(to), animated, host)
    }

    /// Move to `to`.
    pub fn move_to(
        &mut self,
        to: Position,
        animated: bool,
        host: &mut Host<'_>,
    ) -> Result<Option<AnimationId>> {
        if !self.layout.supported_positions().has(to) {
            return Err(PanelError::unsupported(to));
        }
        self.ensure_attached()?;
        let from = self.layout_state.state;
        Ok(self.transition(Some(from), Some(to), animated, host))
    }

    /// Hide the panel off screen.
    pub fn dismiss(&mut self, animated: bool, host: &mut Host<'_>) -> Result<Option<AnimationId>> {
        self.ensure_attached()?;
        let from = self.layout_state.state;
        Ok(self.transition(Some(from), None, animated, host))
    }

    fn ensure_attached(&self) -> Result<()> {
        match self.activity {
            Activity::Removing { .. } | Activity::Removed => Err(PanelError::Detached),
            _ => Ok(()),
        }
    }

    fn transition(
        &mut self,
        from: Option<Position>,
        to: Option<Position>,
        animated: bool,
        host: &mut Host<'_>,
    ) -> Option<AnimationId> {
        if to != Some(Position::Full) {
            self.lock_scroll(host);
        }

        let target_y = to.map_or_else(|| self.layout.hidden_y(), |p| self.layout.position_y(p));
        let target_alpha = to.map_or(0.0, |p| self.layout.backdrop_alpha(p));

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.transition", ?from, ?to, animated);

        if !animated {
            let frame = host.surface.frame().with_origin_y(target_y);
            host.surface.set_frame(frame);
            host.surface.set_backdrop_alpha(target_alpha);
            if let Some(to) = to {
                self.layout_state.state = to;
            }
            self.activity = Activity::Idle;
            return None;
        }

        let (kind, timing) = match (from, to) {
            (None, Some(to)) => (AnimationKind::Add { to }, self.behavior.add_timing(to)),
            (Some(from), Some(to)) => (
                AnimationKind::Move { from, to },
                self.behavior.move_timing(from, to),
            ),
            (Some(from), None) => (AnimationKind::Remove { from }, self.behavior.remove_timing(from)),
            (None, None) => unreachable!("transition needs a source or a destination"),
        };

        let id = self.issue_animation();
        host.animator.start_animation(AnimationRequest {
            id,
            kind,
            target_y,
            target_alpha,
            timing,
            interruptible: true,
        });
        if let Some(to) = to {
            self.layout_state.state = to;
        }
        self.activity = Activity::Moving { id, to };
        Some(id)
    }

    // -----------------------------------------------------------------------
    // Child scroll
    // -----------------------------------------------------------------------

    /// The child scroll finished a programmatic scroll animation.
    pub fn scroll_did_end_scrolling_animation(&mut self, scroll: &dyn ChildScroll) {
        scroll::did_end_scrolling_animation(scroll, &mut self.layout_state);
    }

    /// The child scroll is about to decelerate; returns an overriding target
    /// offset when the panel suppresses the child's momentum.
    #[must_use]
    pub fn scroll_will_end_dragging(&mut self, scroll: &dyn ChildScroll) -> Option<Point> {
        scroll::will_end_dragging(scroll, &mut self.scroll_state)
    }

    fn lock_scroll(&mut self, host: &mut Host<'_>) {
        if let Some(child) = host.scroll.as_deref_mut() {
            if !self.scroll_attached {
                self.attach_scroll(child);
            }
            scroll::lock(child);
        }
    }

    fn unlock_scroll(&self, host: &mut Host<'_>) {
        if let Some(child) = host.scroll.as_deref_mut() {
            scroll::unlock(child, &self.scroll_state);
        }
    }

    fn issue_animation(&mut self) -> AnimationId {
        self.next_animation += 1;
        AnimationId(self.next_animation)
    }
}
