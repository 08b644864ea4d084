#![forbid(unsafe_code)]

//! Mutable interaction state carried across one drag lifecycle.

use crate::geometry::{Point, Rect};
use crate::position::{Position, PositionSet};

/// Snapshot of the panel's interaction state.
///
/// # Invariants
///
/// 1. `state` is a supported position and only changes when a drag ends or
///    a programmatic transition is requested, never mid-drag.
/// 2. `initial_frame`, `initial_scroll_offset` and `translation_offset` are
///    written once when an interaction starts.
/// 3. `interaction_in_progress` is true iff a drag is live.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub state: Position,
    pub initial_frame: Rect,
    pub initial_scroll_offset: Point,
    pub interaction_in_progress: bool,
    pub is_removal_interaction_enabled: bool,
    /// Drag translation at which tracking began.
    pub translation_offset: f64,
}

impl LayoutState {
    #[must_use]
    pub fn new(state: Position) -> Self {
        Self {
            state,
            initial_frame: Rect::ZERO,
            initial_scroll_offset: Point::ZERO,
            interaction_in_progress: false,
            is_removal_interaction_enabled: false,
            translation_offset: 0.0,
        }
    }

    /// Whether `state` is the most closed of the `supported` positions.
    #[must_use]
    pub fn is_bottom_state(&self, supported: PositionSet) -> bool {
        !supported.positions().any(|p| p > self.state)
    }
}

/// Bookkeeping for the embedded child scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollViewState {
    /// One-shot: cancel the child scroll's residual deceleration.
    pub stop_deceleration: bool,
    /// Indicator visibility to restore after unlocking.
    pub scroll_indicators_visible: bool,
}
