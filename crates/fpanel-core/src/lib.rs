#![forbid(unsafe_code)]

//! Core: the interaction and targeting engine of a draggable panel.
//!
//! # Role in fpanel
//! `fpanel-core` decides where a dragged panel goes. A panel rests at one of
//! up to three [`Position`]s (`Full`, `Half`, `Tip`); the user drags it
//! between them or, when enabled, drags it away to remove it.
//!
//! # Primary responsibilities
//! - **Kinematics**: pure functions for the live coordinate, backdrop
//!   dimming, fling projection, target selection and the removal decision.
//! - **Panel**: the drag lifecycle state machine over [`LayoutState`].
//! - **Child scroll coordination**: arbitration between panel motion and an
//!   embedded scroll view.
//!
//! # How it fits in the system
//! The engine renders nothing. Geometry comes from a [`LayoutAdapter`],
//! thresholds and timings from a [`Behavior`], and every effect goes out
//! through the collaborators bundled in a [`Host`]. `fpanel-harness`
//! provides simulated collaborators for tests.

pub mod behavior;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod kinematics;
pub mod layout;
pub mod panel;
pub mod position;
pub mod scroll;
pub mod state;

pub use behavior::{Behavior, DefaultBehavior, Easing, Timing};
pub use error::{PanelError, Result};
pub use event::{DragEvent, DragPhase, PanSample};
pub use geometry::{Point, Rect};
pub use host::{
    AnimationId, AnimationKind, AnimationRequest, AnimationStatus, Animator, ChildScroll, Host,
    PanelDelegate, Surface,
};
pub use layout::{Anchor, LayoutAdapter, StaticLayout};
pub use panel::{Completion, InteractionPhase, Panel};
pub use position::{Position, PositionSet};
pub use state::{LayoutState, ScrollViewState};
