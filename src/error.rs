// src/error.rs
use core::fmt;

/// Library-wide error for tdigest-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TdError {
    /// User tried to insert NaN/±inf.
    /// `context` pinpoints where it came from (e.g., "sample value", "scale factor").
    NonFiniteInput { context: &'static str },

    /// Sample weight that carries no usable mass (non-finite, zero or negative).
    InvalidWeight { context: &'static str },

    /// Invalid scaling factor for digest-level scaling operations.
    InvalidScaleFactor { context: &'static str },
}

impl fmt::Display for TdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TdError::NonFiniteInput { context } => write!(
                f,
                "tdigest: non-finite values are not allowed ({}). \
hint: clean your data or drop NaN/±inf before inserting",
                context
            ),
            TdError::InvalidWeight { context } => write!(
                f,
                "tdigest: invalid weight ({}). hint: weight must be finite and > 0",
                context
            ),
            TdError::InvalidScaleFactor { context } => write!(
                f,
                "tdigest: invalid scale factor ({}). hint: factor must be finite and > 0",
                context
            ),
        }
    }
}

impl std::error::Error for TdError {}

pub type TdResult<T> = Result<T, TdError>;
