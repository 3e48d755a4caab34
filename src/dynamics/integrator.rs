use glam::Vec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::body::Body;

/// Steps every body with position Verlet.
///
/// Per-body work is independent, so with the `parallel` feature it can be
/// spread across Rayon's pool without changing the result.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    parallel: bool,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests parallel execution. Ignored without the `parallel` feature.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled && cfg!(feature = "parallel");
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Adds `gravity` to every body's acceleration.
    pub fn apply_gravity(&self, bodies: &mut [Body], gravity: Vec2) {
        #[cfg(feature = "parallel")]
        if self.parallel {
            bodies.par_iter_mut().for_each(|body| body.apply_force(gravity));
            return;
        }

        for body in bodies.iter_mut() {
            body.apply_force(gravity);
        }
    }

    /// Integrates every body over `dt`.
    pub fn integrate(&self, bodies: &mut [Body], dt: f32) {
        #[cfg(feature = "parallel")]
        if self.parallel {
            bodies.par_iter_mut().for_each(|body| body.integrate(dt));
            return;
        }

        for body in bodies.iter_mut() {
            body.integrate(dt);
        }
    }
}
