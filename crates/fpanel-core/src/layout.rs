#![forbid(unsafe_code)]

//! Layout adapter: maps abstract positions to coordinates.
//!
//! The engine never computes geometry itself. It asks a [`LayoutAdapter`]
//! where each [`Position`] sits, which positions are supported, and how
//! strongly the backdrop dims at each of them.
//!
//! [`StaticLayout`] is a plain-data adapter suitable for configuration files
//! and tests.
//!
//! # Invariants
//!
//! 1. `top_y()` and `bottom_y()` are the coordinates of the most open and
//!    most closed supported positions.
//! 2. For a valid layout, `initial_position()` is a member of
//!    `supported_positions()`.

use crate::error::{PanelError, Result, ensure_finite};
use crate::position::{Position, PositionSet};

/// Default overshoot allowance above the most open position.
pub const DEFAULT_TOP_INTERACTION_BUFFER: f64 = 6.0;

/// Default overshoot allowance below the most closed position.
pub const DEFAULT_BOTTOM_INTERACTION_BUFFER: f64 = 6.0;

/// Geometry source for the panel.
pub trait LayoutAdapter {
    /// Positions this deployment supports.
    fn supported_positions(&self) -> PositionSet;

    /// Position the panel takes when presented.
    fn initial_position(&self) -> Position;

    /// Vertical coordinate of the surface's top edge at `position`.
    fn position_y(&self, position: Position) -> f64;

    /// Backdrop opacity in `[0, 1]` at `position`.
    fn backdrop_alpha(&self, position: Position) -> f64;

    /// Bottom edge of the safe area; the removal progress denominator.
    fn safe_area_bottom_y(&self) -> f64;

    /// Coordinate of the surface when it is off screen.
    fn hidden_y(&self) -> f64;

    fn top_interaction_buffer(&self) -> f64 {
        DEFAULT_TOP_INTERACTION_BUFFER
    }

    fn bottom_interaction_buffer(&self) -> f64 {
        DEFAULT_BOTTOM_INTERACTION_BUFFER
    }

    /// Coordinate of the most open supported position.
    fn top_y(&self) -> f64 {
        self.supported_positions()
            .most_open()
            .map_or_else(|| self.hidden_y(), |p| self.position_y(p))
    }

    fn middle_y(&self) -> f64 {
        self.position_y(Position::Half)
    }

    /// Coordinate of the most closed supported position.
    fn bottom_y(&self) -> f64 {
        self.supported_positions()
            .most_closed()
            .map_or_else(|| self.hidden_y(), |p| self.position_y(p))
    }
}

/// Coordinate and backdrop opacity of one supported position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop_alpha: f64,
}

impl Anchor {
    #[must_use]
    pub const fn new(y: f64, backdrop_alpha: f64) -> Self {
        Self { y, backdrop_alpha }
    }
}

/// A layout given entirely by configuration.
///
/// A position is supported iff it has an [`Anchor`]. Unsupported positions
/// report `hidden_y` and a fully transparent backdrop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StaticLayout {
    pub initial_position: Position,
    // Absent anchors mean unsupported, not the default layout's anchors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub full: Option<Anchor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub half: Option<Anchor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tip: Option<Anchor>,
    pub top_interaction_buffer: f64,
    pub bottom_interaction_buffer: f64,
    pub safe_area_bottom_y: f64,
    pub hidden_y: f64,
}

impl Default for StaticLayout {
    /// A phone-sized container with all three positions.
    fn default() -> Self {
        Self {
            initial_position: Position::Half,
            full: Some(Anchor::new(18.0, 0.3)),
            half: Some(Anchor::new(450.0, 0.0)),
            tip: Some(Anchor::new(730.0, 0.0)),
            top_interaction_buffer: DEFAULT_TOP_INTERACTION_BUFFER,
            bottom_interaction_buffer: DEFAULT_BOTTOM_INTERACTION_BUFFER,
            safe_area_bottom_y: 778.0,
            hidden_y: 812.0,
        }
    }
}

impl StaticLayout {
    /// A layout with no anchors; add them with [`with_anchor`](Self::with_anchor).
    #[must_use]
    pub fn empty(safe_area_bottom_y: f64, hidden_y: f64) -> Self {
        Self {
            full: None,
            half: None,
            tip: None,
            safe_area_bottom_y,
            hidden_y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, position: Position, anchor: Anchor) -> Self {
        *self.anchor_mut(position) = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_initial_position(mut self, position: Position) -> Self {
        self.initial_position = position;
        self
    }

    #[must_use]
    pub fn with_interaction_buffers(mut self, top: f64, bottom: f64) -> Self {
        self.top_interaction_buffer = top;
        self.bottom_interaction_buffer = bottom;
        self
    }

    #[must_use]
    pub fn anchor(&self, position: Position) -> Option<Anchor> {
        match position {
            Position::Full => self.full,
            Position::Half => self.half,
            Position::Tip => self.tip,
        }
    }

    fn anchor_mut(&mut self, position: Position) -> &mut Option<Anchor> {
        match position {
            Position::Full => &mut self.full,
            Position::Half => &mut self.half,
            Position::Tip => &mut self.tip,
        }
    }

    /// Check the layout for configuration errors.
    pub fn validate(&self) -> Result<()> {
        validate_layout(self)?;
        ensure_finite("top_interaction_buffer", self.top_interaction_buffer)?;
        ensure_finite("bottom_interaction_buffer", self.bottom_interaction_buffer)?;
        ensure_finite("hidden_y", self.hidden_y)
    }
}

impl LayoutAdapter for StaticLayout {
    fn supported_positions(&self) -> PositionSet {
        Position::ALL
            .into_iter()
            .filter(|p| self.anchor(*p).is_some())
            .collect()
    }

    fn initial_position(&self) -> Position {
        self.initial_position
    }

    fn position_y(&self, position: Position) -> f64 {
        self.anchor(position).map_or(self.hidden_y, |a| a.y)
    }

    fn backdrop_alpha(&self, position: Position) -> f64 {
        self.anchor(position).map_or(0.0, |a| a.backdrop_alpha)
    }

    fn safe_area_bottom_y(&self) -> f64 {
        self.safe_area_bottom_y
    }

    fn hidden_y(&self) -> f64 {
        self.hidden_y
    }

    fn top_interaction_buffer(&self) -> f64 {
        self.top_interaction_buffer
    }

    fn bottom_interaction_buffer(&self) -> f64 {
        self.bottom_interaction_buffer
    }
}

/// Check any adapter for the configuration errors the engine cannot absorb.
///
/// Degenerate geometry (two positions sharing a coordinate) is allowed; the
/// kinematics guard against it.
pub fn validate_layout<L: LayoutAdapter + ?Sized>(layout: &L) -> Result<()> {
    let supported = layout.supported_positions();
    if supported.is_empty() {
        return Err(PanelError::NoSupportedPositions);
    }
    let initial = layout.initial_position();
    if !supported.has(initial) {
        return Err(PanelError::unsupported(initial));
    }
    for position in supported.positions() {
        ensure_finite("position_y", layout.position_y(position))?;
        let alpha = layout.backdrop_alpha(position);
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PanelError::BackdropAlphaOutOfRange { position, alpha });
        }
    }
    ensure_finite("safe_area_bottom_y", layout.safe_area_bottom_y())
}
