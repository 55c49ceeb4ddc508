use thiserror::Error;

use crate::Side;

/// Failure of an offset operation. The input geometry or feature is never
/// touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OffsetError {
    #[error("unsupported geometry variant: {0}")]
    UnsupportedGeometry(&'static str),

    #[error("side {side} is not valid for {variant} geometry")]
    InvalidSide { side: Side, variant: &'static str },

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("offset distance {0} is not a positive finite number")]
    InvalidDistance(f64),

    #[error("unknown side: {0:?}")]
    UnknownSide(String),
}

/// Convenience type alias for results using [`OffsetError`].
pub type Result<T> = std::result::Result<T, OffsetError>;
