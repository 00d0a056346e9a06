//! Error taxonomy for estimation requests.
//!
//! Every failure is local and synchronous: it is raised before the first
//! trial starts or aborts the whole request. There is no partial result.

/// Errors that can occur while building a board or running an estimate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("invalid board dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("point ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}
