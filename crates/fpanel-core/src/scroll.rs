#![forbid(unsafe_code)]

//! Child scroll coordination.
//!
//! A panel that embeds a scrollable region sees the same vertical drag twice:
//! once as a panel drag and once as a content scroll. These functions decide
//! which of the two owns the motion and keep the other one still.
//!
//! # Invariants
//!
//! 1. Exactly one of "panel moves" and "child scrolls" is active at a time:
//!    the child scroll only keeps a drag while the panel is settled `Full`
//!    and idle.
//! 2. While the surface is below its most open coordinate, the child's
//!    content offset is pinned.

use crate::event::PanSample;
use crate::geometry::{Point, Rect};
use crate::host::ChildScroll;
use crate::position::Position;
use crate::state::{LayoutState, ScrollViewState};

/// Offset past the content top above which the child scroll may bounce.
pub const BOUNCE_EPSILON: f64 = 10.0;

/// Whether a panel drag sample belongs to the child scroll instead.
///
/// `grabber_area` is in surface coordinates, like `sample.location`.
#[must_use]
pub fn should_yield_to_child_scroll(
    scroll: &dyn ChildScroll,
    sample: &PanSample,
    layout_state: &LayoutState,
    grabber_area: Rect,
) -> bool {
    if layout_state.state != Position::Full
        || layout_state.interaction_in_progress
        || !scroll.frame().contains(sample.location)
        || grabber_area.contains(sample.location)
    {
        return false;
    }

    scroll.content_offset().y - scroll.content_offset_zero().y != 0.0
        || scroll.is_decelerating()
        || sample.velocity.y < 0.0
}

/// Reconcile the child scroll on one of its own drag updates.
pub fn will_update(
    scroll: &mut dyn ChildScroll,
    surface_frame: Rect,
    top_y: f64,
    layout_state: &LayoutState,
) {
    // No top bounce while the drag may still hand over to the panel.
    if !scroll.is_decelerating() {
        scroll.set_bounces(scroll.content_offset().y > BOUNCE_EPSILON);
    }

    if surface_frame.min_y() <= top_y {
        return;
    }
    match layout_state.state {
        Position::Full => {
            let zero = scroll.content_offset_zero();
            pin_vertical(scroll, zero.y);
        }
        Position::Half | Position::Tip => {
            // Pinning while decelerating fights the settle animation from full.
            if scroll.is_decelerating() {
                return;
            }
            pin_vertical(scroll, layout_state.initial_scroll_offset.y);
        }
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(
        message = "panel.scroll.pinned",
        state = %layout_state.state,
        offset_y = scroll.content_offset().y
    );
}

fn pin_vertical(scroll: &mut dyn ChildScroll, y: f64) {
    let offset = scroll.content_offset();
    scroll.set_content_offset(Point::new(offset.x, y));
}

/// The child scroll finished a programmatic scroll animation.
pub fn did_end_scrolling_animation(scroll: &dyn ChildScroll, layout_state: &mut LayoutState) {
    if layout_state.state != Position::Full {
        layout_state.initial_scroll_offset = scroll.content_offset();
    }
}

/// The child scroll is about to decelerate after its own drag.
///
/// Returns the content offset to stop at when the panel asked to suppress
/// the child's momentum, consuming that request.
#[must_use]
pub fn will_end_dragging(
    scroll: &dyn ChildScroll,
    scroll_state: &mut ScrollViewState,
) -> Option<Point> {
    if scroll_state.stop_deceleration {
        scroll_state.stop_deceleration = false;
        Some(scroll.content_offset())
    } else {
        None
    }
}

/// Stop the child scroll from competing with panel motion.
pub fn lock(scroll: &mut dyn ChildScroll) {
    scroll.set_directional_lock(true);
    scroll.set_shows_vertical_indicator(false);
}

/// Hand vertical motion back to the child scroll.
pub fn unlock(scroll: &mut dyn ChildScroll, scroll_state: &ScrollViewState) {
    scroll.set_directional_lock(false);
    scroll.set_shows_vertical_indicator(scroll_state.scroll_indicators_visible);
}
