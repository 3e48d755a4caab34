//! Simulation dynamics: integration, domain constraints, and body spawning.

pub mod constraints;
pub mod integrator;
pub mod spawner;

pub use constraints::{apply_boundary, clamp_to_rect, contain_in_circle, is_contained};
pub use integrator::Integrator;
pub use spawner::Spawner;
