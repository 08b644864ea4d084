#![forbid(unsafe_code)]

//! Configuration and request errors.

use thiserror::Error;

use crate::position::Position;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("layout supports no positions")]
    NoSupportedPositions,

    #[error("position {position} is not supported by the layout")]
    UnsupportedPosition { position: Position },

    #[error("backdrop alpha for {position} must be within [0, 1], got {alpha}")]
    BackdropAlphaOutOfRange { position: Position, alpha: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("panel has been removed from its parent")]
    Detached,
}

impl PanelError {
    #[must_use]
    pub fn unsupported(position: Position) -> Self {
        Self::UnsupportedPosition { position }
    }
}

/// Reject NaN and infinities in a configuration value.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PanelError::NonFinite { field, value })
    }
}
