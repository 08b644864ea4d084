#![forbid(unsafe_code)]

//! Harness: simulated collaborators for driving `fpanel-core` panels.
//!
//! # Role in fpanel
//! The core engine only talks to traits. This crate implements them in
//! memory so whole drag scenarios can run headless: a [`SimSurface`] that
//! records frames, a [`SimAnimator`] that steps curves and springs frame by
//! frame, a [`SimScroll`] child scroll view and a [`RecordingDelegate`].
//!
//! [`Rig`] wires them to a [`Panel`](fpanel_core::Panel) and offers drag
//! scripts and frame stepping.
//!
//! # Example
//!
//! ```
//! use fpanel_core::{DefaultBehavior, Position, StaticLayout};
//! use fpanel_harness::Rig;
//!
//! let mut rig = Rig::new(StaticLayout::default(), DefaultBehavior::default())?;
//! rig.drag(&[-100.0, -300.0, -420.0], -800.0);
//! rig.run_until_idle();
//! assert_eq!(rig.position(), Position::Full);
//! assert_eq!(rig.y(), 18.0);
//! # Ok::<(), fpanel_core::PanelError>(())
//! ```

pub mod animator;
pub mod delegate;
pub mod rig;
pub mod spring;
pub mod surface;

pub use animator::SimAnimator;
pub use delegate::{DelegateEvent, RecordingDelegate};
pub use rig::{FRAME, Rig};
pub use spring::Spring;
pub use surface::{SimScroll, SimSurface};
