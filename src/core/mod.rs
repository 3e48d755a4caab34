//! Core types describing simulated bodies.

pub mod body;
pub mod color;

pub use body::Body;
pub use color::Color;
