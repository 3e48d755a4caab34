use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::{ColorMode, SpawnerConfig};
use crate::core::{body::Body, color::Color};
use crate::utils::math::wrap_degrees;

/// Degrees the rainbow hue advances per spawned body.
pub const HUE_STEP_DEGREES: f32 = 1.0;

/// Builds the bodies emitted by the solver's rate-limited fountain.
///
/// Owns the state that must persist between spawns: the rainbow hue angle and
/// the random generator.
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    hue_angle: f32,
    rng: StdRng,
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            hue_angle: 0.0,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Current rainbow hue in degrees, in `[0, 360)`.
    pub fn hue_angle(&self) -> f32 {
        self.hue_angle
    }

    /// Advances the hue and returns the matching rainbow color.
    pub fn next_rainbow(&mut self) -> Color {
        self.hue_angle = wrap_degrees(self.hue_angle + HUE_STEP_DEGREES);
        Color::rainbow(self.hue_angle)
    }

    /// Radius and color for the next body according to the color mode.
    fn next_appearance(&mut self) -> (f32, Color) {
        match self.config.color_mode {
            ColorMode::Rainbow => (self.config.radius, self.next_rainbow()),
            ColorMode::RandomHue {
                min_radius,
                max_radius,
            } => {
                let radius = if max_radius > min_radius {
                    self.rng.gen_range(min_radius..=max_radius)
                } else {
                    min_radius
                };
                let hue = self.rng.gen_range(0.0..360.0);
                (radius, Color::from_hue(hue))
            }
        }
    }

    /// Spawn position for a scene centered at `center`.
    pub fn origin(&self, center: Vec2) -> Vec2 {
        center + center * self.config.offset_factor
    }

    /// Launch velocity at solver time `time`.
    pub fn launch_velocity(&self, time: f32) -> Vec2 {
        Vec2::from_angle(self.config.launch.angle_at(time)) * self.config.speed
    }

    /// Builds the next body, with its velocity encoded for a step of `dt`.
    pub fn make_body(&mut self, center: Vec2, time: f32, dt: f32) -> Body {
        let (radius, color) = self.next_appearance();
        let mut body = Body::new(radius, color, self.origin(center));
        if let Some(max_speed) = self.config.max_speed {
            body = body.with_max_speed(max_speed);
        }
        body.set_velocity(self.launch_velocity(time), dt);
        body
    }
}
