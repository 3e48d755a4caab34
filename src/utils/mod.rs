//! Utility helpers: math extensions, logging, and profiling.

pub mod logging;
pub mod math;
pub mod profiling;

pub use logging::{PhaseTrace, warn_if_frame_budget_exceeded};
pub use math::*;
pub use profiling::SolverProfiler;
