#![forbid(unsafe_code)]

//! Delegate that records every hook call.

use fpanel_core::{PanelDelegate, Point, Position};

/// One delegate hook invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelegateEvent {
    DidMove,
    WillBeginDragging,
    DidEndDragging { velocity_y: f64, target: Position },
    WillBeginDecelerating,
    DidEndDecelerating,
    DidEndDraggingToRemove { velocity_y: f64 },
    DidEndRemove,
}

/// Records hook calls in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelegate {
    events: Vec<DelegateEvent>,
}

impl RecordingDelegate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[DelegateEvent] {
        &self.events
    }

    /// Recorded events with the per-frame `DidMove` noise removed.
    #[must_use]
    pub fn milestones(&self) -> Vec<DelegateEvent> {
        self.events
            .iter()
            .copied()
            .filter(|event| *event != DelegateEvent::DidMove)
            .collect()
    }

    #[must_use]
    pub fn count(&self, event: DelegateEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl PanelDelegate for RecordingDelegate {
    fn did_move(&mut self) {
        self.events.push(DelegateEvent::DidMove);
    }

    fn will_begin_dragging(&mut self) {
        self.events.push(DelegateEvent::WillBeginDragging);
    }

    fn did_end_dragging(&mut self, velocity: Point, target: Position) {
        self.events.push(DelegateEvent::DidEndDragging {
            velocity_y: velocity.y,
            target,
        });
    }

    fn will_begin_decelerating(&mut self) {
        self.events.push(DelegateEvent::WillBeginDecelerating);
    }

    fn did_end_decelerating(&mut self) {
        self.events.push(DelegateEvent::DidEndDecelerating);
    }

    fn did_end_dragging_to_remove(&mut self, velocity: Point) {
        self.events.push(DelegateEvent::DidEndDraggingToRemove {
            velocity_y: velocity.y,
        });
    }

    fn did_end_remove(&mut self) {
        self.events.push(DelegateEvent::DidEndRemove);
    }
}
