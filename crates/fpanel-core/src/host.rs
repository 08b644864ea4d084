#![forbid(unsafe_code)]

//! Collaborator seams.
//!
//! The engine renders nothing and animates nothing. It drives a
//! [`Surface`], asks an [`Animator`] to run transitions, coordinates with an
//! optional [`ChildScroll`], and reports progress to an optional
//! [`PanelDelegate`]. A [`Host`] borrows all of them for the duration of one
//! call, so the panel never owns its collaborators.

use crate::behavior::Timing;
use crate::geometry::{Point, Rect};
use crate::position::Position;

/// Height of the grabber bar drawn at the top of the surface.
pub const GRABBER_BAR_HEIGHT: f64 = 6.0;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// The panel's visible surface and its backdrop.
pub trait Surface {
    /// Current frame in the container's coordinates.
    fn frame(&self) -> Rect;

    fn set_frame(&mut self, frame: Rect);

    fn set_backdrop_alpha(&mut self, alpha: f64);

    /// Area, in surface coordinates, where touches always drag the panel.
    fn grabber_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.frame().width, GRABBER_BAR_HEIGHT * 2.0)
    }

    /// Detach the surface from its container after removal.
    fn remove_from_parent(&mut self);
}

// ---------------------------------------------------------------------------
// Child scroll
// ---------------------------------------------------------------------------

/// A scrollable region embedded in the surface.
pub trait ChildScroll {
    fn content_offset(&self) -> Point;

    fn set_content_offset(&mut self, offset: Point);

    /// Offset at which the content is scrolled to its top.
    fn content_offset_zero(&self) -> Point {
        Point::ZERO
    }

    fn is_decelerating(&self) -> bool;

    fn shows_vertical_indicator(&self) -> bool;

    fn set_shows_vertical_indicator(&mut self, visible: bool);

    fn set_directional_lock(&mut self, enabled: bool);

    fn set_bounces(&mut self, bounces: bool);

    /// Frame in the surface's coordinates.
    fn frame(&self) -> Rect;
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Identity of one requested animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// What a requested animation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Presenting the panel at a position.
    Add { to: Position },
    /// Programmatic move between positions.
    Move { from: Position, to: Position },
    /// Programmatic dismissal.
    Remove { from: Position },
    /// Settling after a drag.
    Interaction { to: Position },
    /// Removal after a drag.
    RemovalInteraction,
}

/// A transition for the animator to run.
///
/// The animator moves the surface's top edge to `target_y` and fades the
/// backdrop to `target_alpha`, then reports back through
/// [`Panel::animation_did_complete`](crate::Panel::animation_did_complete).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub id: AnimationId,
    pub kind: AnimationKind,
    pub target_y: f64,
    pub target_alpha: f64,
    pub timing: Timing,
    pub interruptible: bool,
}

/// How an animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Finished,
    Interrupted,
}

/// Runs transitions on behalf of the panel.
pub trait Animator {
    fn start_animation(&mut self, request: AnimationRequest);
}

// ---------------------------------------------------------------------------
// Delegate
// ---------------------------------------------------------------------------

/// Progress hooks. Every hook defaults to a no-op.
pub trait PanelDelegate {
    /// The surface moved during a drag.
    fn did_move(&mut self) {}

    fn will_begin_dragging(&mut self) {}

    /// The finger lifted; `velocity` is in points per second.
    fn did_end_dragging(&mut self, _velocity: Point, _target: Position) {}

    fn will_begin_decelerating(&mut self) {}

    fn did_end_decelerating(&mut self) {}

    /// The finger lifted and the panel is being removed.
    fn did_end_dragging_to_remove(&mut self, _velocity: Point) {}

    fn did_end_remove(&mut self) {}
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Collaborators borrowed for one call into the panel.
pub struct Host<'a> {
    pub surface: &'a mut dyn Surface,
    pub animator: &'a mut dyn Animator,
    pub scroll: Option<&'a mut dyn ChildScroll>,
    pub delegate: Option<&'a mut dyn PanelDelegate>,
}

impl<'a> Host<'a> {
    /// A host without child scroll or delegate.
    pub fn new(surface: &'a mut dyn Surface, animator: &'a mut dyn Animator) -> Self {
        Self {
            surface,
            animator,
            scroll: None,
            delegate: None,
        }
    }

    /// Supply the embedded child scroll. Its indicator visibility is
    /// recorded by [`Panel::attach_scroll`](crate::Panel::attach_scroll), or
    /// on the first lock if it was never attached.
    #[must_use]
    pub fn with_scroll(mut self, scroll: &'a mut dyn ChildScroll) -> Self {
        self.scroll = Some(scroll);
        self
    }

    #[must_use]
    pub fn with_delegate(mut self, delegate: &'a mut dyn PanelDelegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub(crate) fn notify(&mut self, hook: impl FnOnce(&mut dyn PanelDelegate)) {
        if let Some(delegate) = self.delegate.as_deref_mut() {
            hook(delegate);
        }
    }
}

impl std::fmt::Debug for Host<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("frame", &self.surface.frame())
            .field("scroll", &self.scroll.is_some())
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}
