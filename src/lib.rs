//! Verlet Sim – a sub-stepped 2D particle solver for Rust.
//!
//! Circular bodies fall under gravity, are kept inside a rectangular or
//! circular domain, and push each other apart with position-based overlap
//! removal. A counting-sort spatial hash keeps collision detection close to
//! linear in the number of bodies.
//!
//! The crate is the simulation core only: a presentation layer calls
//! [`Solver::update`] once per frame and draws [`Solver::bodies`].

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod solver;
pub mod utils;

pub use glam::Vec2;

pub use collision::{resolve_collision, SpatialHashGrid};
pub use config::{BoundaryPolicy, ColorMode, GridRebuild, LaunchPattern, SolverConfig, SpawnerConfig};
pub use core::{body::Body, color::Color};
pub use dynamics::{Integrator, Spawner};
pub use error::{GridError, Result, SolverError};
pub use solver::Solver;
pub use utils::profiling::SolverProfiler;
