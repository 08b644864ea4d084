#![forbid(unsafe_code)]

//! Drag events fed into the panel.
//!
//! The caller tags every gesture update with its source. The panel's own
//! drag and the embedded child scroll's drag are distinct events even
//! when both recognizers track the same touch.

use crate::geometry::Point;

/// Lifecycle phase of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Recognizer has not decided yet.
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl DragPhase {
    /// Whether this phase finishes the gesture.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// One sample of a drag on the panel surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSample {
    pub phase: DragPhase,
    /// Cumulative translation in the container's coordinates.
    pub translation: Point,
    /// Velocity in points per second.
    pub velocity: Point,
    /// Touch location in the surface's coordinates.
    pub location: Point,
}

impl PanSample {
    #[must_use]
    pub const fn new(phase: DragPhase, translation: Point, velocity: Point) -> Self {
        Self {
            phase,
            translation,
            velocity,
            location: Point::ZERO,
        }
    }

    #[must_use]
    pub const fn at(mut self, location: Point) -> Self {
        self.location = location;
        self
    }
}

/// A gesture update, tagged by the recognizer that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The panel surface's own drag.
    FromPanel(PanSample),
    /// The embedded child scroll's drag.
    FromChildScroll(DragPhase),
}
