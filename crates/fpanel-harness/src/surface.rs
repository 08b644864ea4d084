#![forbid(unsafe_code)]

//! In-memory panel surface and child scroll view.

use fpanel_core::{ChildScroll, Point, Rect, Surface};

/// A panel surface that records what the engine did to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSurface {
    frame: Rect,
    backdrop_alpha: f64,
    attached: bool,
    frame_writes: usize,
}

impl SimSurface {
    /// A surface of the given size whose top edge sits at `y`.
    #[must_use]
    pub fn new(width: f64, height: f64, y: f64) -> Self {
        Self {
            frame: Rect::new(0.0, y, width, height),
            backdrop_alpha: 0.0,
            attached: true,
            frame_writes: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.frame.y
    }

    #[inline]
    #[must_use]
    pub fn backdrop_alpha(&self) -> f64 {
        self.backdrop_alpha
    }

    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of frame writes since creation.
    #[inline]
    #[must_use]
    pub fn frame_writes(&self) -> usize {
        self.frame_writes
    }

    /// Reattach after a removal so the panel can be presented again.
    pub fn reattach(&mut self) {
        self.attached = true;
    }
}

impl Surface for SimSurface {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.frame_writes += 1;
    }

    fn set_backdrop_alpha(&mut self, alpha: f64) {
        self.backdrop_alpha = alpha;
    }

    fn remove_from_parent(&mut self) {
        tracing::trace!(message = "surface.detached", y = self.frame.y);
        self.attached = false;
    }
}

/// A scroll view embedded in the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SimScroll {
    frame: Rect,
    offset: Point,
    zero: Point,
    shows_indicator: bool,
    directional_lock: bool,
    bounces: bool,
}

impl SimScroll {
    /// A scroll view occupying `frame` in panel coordinates, scrolled to the top.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            offset: Point::ZERO,
            zero: Point::ZERO,
            shows_indicator: true,
            directional_lock: false,
            bounces: true,
        }
    }

    /// Content inset pushes the resting offset above zero.
    #[must_use]
    pub fn with_top_inset(mut self, inset: f64) -> Self {
        self.zero = Point::new(0.0, -inset);
        self.offset = self.zero;
        self
    }

    #[inline]
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset.y
    }

    /// Scroll the content as a user would.
    pub fn scroll_to(&mut self, y: f64) {
        self.offset.y = y;
    }

    #[inline]
    #[must_use]
    pub fn is_directionally_locked(&self) -> bool {
        self.directional_lock
    }

    #[inline]
    #[must_use]
    pub fn bounces(&self) -> bool {
        self.bounces
    }

    #[inline]
    #[must_use]
    pub fn shows_indicator(&self) -> bool {
        self.shows_indicator
    }
}

impl ChildScroll for SimScroll {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn content_offset_zero(&self) -> Point {
        self.zero
    }

    fn is_decelerating(&self) -> bool {
        false
    }

    fn shows_vertical_indicator(&self) -> bool {
        self.shows_indicator
    }

    fn set_shows_vertical_indicator(&mut self, shows: bool) {
        self.shows_indicator = shows;
    }

    fn set_directional_lock(&mut self, enabled: bool) {
        self.directional_lock = enabled;
    }

    fn set_bounces(&mut self, bounces: bool) {
        self.bounces = bounces;
    }

    fn frame(&self) -> Rect {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_counts_frame_writes() {
        let mut surface = SimSurface::new(375.0, 800.0, 450.0);
        surface.set_frame(surface.frame().with_origin_y(300.0));
        assert_eq!(surface.y(), 300.0);
        assert_eq!(surface.frame_writes(), 1);
        surface.remove_from_parent();
        assert!(!surface.is_attached());
    }

    #[test]
    fn top_inset_moves_zero() {
        let scroll = SimScroll::new(Rect::new(0.0, 40.0, 375.0, 600.0)).with_top_inset(20.0);
        assert_eq!(scroll.content_offset_zero(), Point::new(0.0, -20.0));
        assert_eq!(scroll.offset_y(), -20.0);
    }
}
