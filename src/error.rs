use thiserror::Error;

/// Top-level error type for the biarc approximation crate.
#[derive(Debug, Error)]
pub enum BiarcError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("lines are parallel")]
    ParallelLines,
}

/// Errors related to approximation operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid parameter: {parameter} = {value} must be positive and finite")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`BiarcError`].
pub type Result<T> = std::result::Result<T, BiarcError>;
