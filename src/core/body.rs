use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;

/// A circular particle advanced by position Verlet.
///
/// Velocity is never stored: it is implied by `position - position_last`,
/// the displacement over the last integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
    pub color: Color,
    pub position: Vec2,
    pub position_last: Vec2,
    pub acceleration: Vec2,
    /// Terminal speed; the implied velocity is clamped to it on integration.
    pub max_speed: Option<f32>,
}

impl Body {
    /// Creates a body at rest at `position`.
    pub fn new(radius: f32, color: Color, position: Vec2) -> Self {
        Self {
            radius,
            color,
            position,
            position_last: position,
            acceleration: Vec2::ZERO,
            max_speed: None,
        }
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Advances one Verlet step and clears the accumulated acceleration.
    pub fn integrate(&mut self, dt: f32) {
        let mut displacement = self.position - self.position_last;

        if let Some(max_speed) = self.max_speed {
            let max_step = max_speed * dt;
            if displacement.length_squared() > max_step * max_step {
                displacement = displacement.normalize_or_zero() * max_step;
            }
        }

        self.position_last = self.position;
        self.position += displacement + self.acceleration * (dt * dt);
        self.acceleration = Vec2::ZERO;
    }

    /// Accumulates a force; bodies have unit mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Encodes `velocity` into the position history. `dt` must be the step the
    /// next [`integrate`](Self::integrate) call will use.
    pub fn set_velocity(&mut self, velocity: Vec2, dt: f32) {
        self.position_last = self.position - velocity * dt;
    }

    pub fn displacement(&self) -> Vec2 {
        self.position - self.position_last
    }

    /// Implied velocity over a step of `dt`.
    pub fn velocity(&self, dt: f32) -> Vec2 {
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        self.displacement() / dt
    }
}
