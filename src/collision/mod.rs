//! Collision detection: the spatial hash broad-phase and circle overlap resolution.

pub mod resolve;
pub mod spatial_hash;

pub use resolve::{overlap, pair_mut, resolve_collision};
pub use spatial_hash::SpatialHashGrid;
