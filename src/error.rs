//! Error types for the solver and its spatial index.
//!
//! Every error here is local and recoverable: callers are expected to log or
//! ignore it and keep the frame loop running.

use thiserror::Error;

/// Errors raised by [`SpatialHashGrid`](crate::collision::SpatialHashGrid).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),
    #[error("grid capacity must be greater than zero")]
    ZeroCapacity,
    #[error("grid capacity exceeded: {requested} objects for a capacity of {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },
    #[error("query index {index} out of range for {len} positions")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised by [`Solver`](crate::Solver).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Convenient Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
