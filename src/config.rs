//! Global configuration constants and tunables for the solver.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};

/// Default gravity vector in scene units per second squared (Y-down, screen space).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 1000.0];

/// Number of fixed sub-steps each `update` is split into.
pub const DEFAULT_SUB_STEPS: u32 = 8;

/// Radius of spawned bodies.
pub const DEFAULT_BODY_RADIUS: f32 = 6.0;

/// Broad-phase cell size, roughly one body diameter.
pub const DEFAULT_GRID_SPACING: f32 = DEFAULT_BODY_RADIUS * 2.0;

/// Fraction of the overlap removed per pair resolution (before the 0.5 split).
pub const DEFAULT_COLLISION_RESPONSE: f32 = 0.75;

/// Fraction of the implied velocity kept when a body hits a rectangular wall.
pub const DEFAULT_WALL_DAMPING: f32 = 0.75;

/// Multiplier on a body's radius used as the grid query half-width.
pub const DEFAULT_QUERY_RADIUS_FACTOR: f32 = 2.0;

/// Launch speed of spawned bodies.
pub const DEFAULT_SPAWN_SPEED: f32 = 100.0;

/// Launch angle of spawned bodies, in radians.
pub const DEFAULT_LAUNCH_ANGLE: f32 = 2.25 * PI;

/// Spawn point offset from the scene center, as a multiple of the center.
pub const DEFAULT_SPAWN_OFFSET_FACTOR: f32 = -0.75;

/// Seed of the random color/radius generator.
pub const DEFAULT_SPAWN_SEED: u64 = 0x5EED_0F_B0D1E5;

/// Frame budget in milliseconds used for overrun warnings.
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 16.6;

/// Domain constraint applied to every body once per sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Axis-aligned box `[0, width] x [0, height]`; crossing an edge snaps the body
    /// back and keeps `damping` of its implied velocity along that axis.
    Rect { width: f32, height: f32, damping: f32 },
    /// Bodies are kept inside a circle; no damping, bodies slide along the rim.
    Circle { center: Vec2, radius: f32 },
}

impl BoundaryPolicy {
    pub fn rect(bounds: Vec2) -> Self {
        Self::Rect {
            width: bounds.x,
            height: bounds.y,
            damping: DEFAULT_WALL_DAMPING,
        }
    }

    /// Circle centered in `bounds`.
    pub fn circle_from(bounds: Vec2, radius: f32) -> Self {
        Self::Circle {
            center: bounds * 0.5,
            radius,
        }
    }
}

/// When the spatial hash is rebuilt during an `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridRebuild {
    /// Rebuilt before every sub-step from the current positions.
    #[default]
    PerSubStep,
    /// Built once per `update` and reused by all sub-steps. Cheaper, but the
    /// index lags behind bodies that cross cell borders mid-update.
    PerUpdate,
}

/// Direction in which spawned bodies are launched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LaunchPattern {
    /// Constant angle in radians.
    Fixed(f32),
    /// `amplitude * sin(time / period) + base`, with `time` the solver clock.
    Sweep { base: f32, amplitude: f32, period: f32 },
}

impl LaunchPattern {
    pub fn angle_at(&self, time: f32) -> f32 {
        match *self {
            Self::Fixed(angle) => angle,
            Self::Sweep {
                base,
                amplitude,
                period,
            } => amplitude * (time / period).sin() + base,
        }
    }
}

impl Default for LaunchPattern {
    fn default() -> Self {
        Self::Fixed(DEFAULT_LAUNCH_ANGLE)
    }
}

/// How spawned bodies are colored (and sized).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Deterministic rainbow cycle, one degree of hue per spawn.
    #[default]
    Rainbow,
    /// Random hue and a random radius in `[min_radius, max_radius]`.
    RandomHue { min_radius: f32, max_radius: f32 },
}

/// Parameters of the rate-limited body generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub radius: f32,
    pub speed: f32,
    /// Spawn point relative to the scene center, in multiples of the center.
    pub offset_factor: Vec2,
    pub launch: LaunchPattern,
    pub color_mode: ColorMode,
    /// Optional terminal speed given to spawned bodies.
    pub max_speed: Option<f32>,
    /// Seed for [`ColorMode::RandomHue`] draws.
    pub seed: u64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BODY_RADIUS,
            speed: DEFAULT_SPAWN_SPEED,
            offset_factor: Vec2::splat(DEFAULT_SPAWN_OFFSET_FACTOR),
            launch: LaunchPattern::default(),
            color_mode: ColorMode::default(),
            max_speed: None,
            seed: DEFAULT_SPAWN_SEED,
        }
    }
}

/// Full solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Size of the scene; its midpoint is the spawn center.
    pub scene_bounds: Vec2,
    pub boundary: BoundaryPolicy,
    pub gravity: Vec2,
    pub sub_steps: u32,
    pub grid_spacing: f32,
    /// Initial grid capacity; grown on demand.
    pub capacity_hint: usize,
    pub grid_rebuild: GridRebuild,
    pub collision_response: f32,
    pub query_radius_factor: f32,
    /// Population cap enforced by spawning. `None` means unbounded.
    pub max_bodies: Option<usize>,
    pub frame_budget_ms: f32,
    pub spawner: SpawnerConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let bounds = Vec2::new(1000.0, 1000.0);
        Self {
            scene_bounds: bounds,
            boundary: BoundaryPolicy::rect(bounds),
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            sub_steps: DEFAULT_SUB_STEPS,
            grid_spacing: DEFAULT_GRID_SPACING,
            capacity_hint: 1024,
            grid_rebuild: GridRebuild::default(),
            collision_response: DEFAULT_COLLISION_RESPONSE,
            query_radius_factor: DEFAULT_QUERY_RADIUS_FACTOR,
            max_bodies: None,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            spawner: SpawnerConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Checks the invariants the solver relies on.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SolverError::InvalidConfig(msg));

        if self.sub_steps == 0 {
            return invalid("sub_steps must be at least 1".into());
        }
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return invalid(format!("grid_spacing must be positive, got {}", self.grid_spacing));
        }
        if !(self.query_radius_factor.is_finite() && self.query_radius_factor > 0.0) {
            return invalid(format!(
                "query_radius_factor must be positive, got {}",
                self.query_radius_factor
            ));
        }
        if !(0.0..=1.0).contains(&self.collision_response) {
            return invalid(format!(
                "collision_response must lie in [0, 1], got {}",
                self.collision_response
            ));
        }
        if !self.scene_bounds.is_finite() || self.scene_bounds.min_element() <= 0.0 {
            return invalid(format!("scene_bounds must be finite and positive, got {}", self.scene_bounds));
        }
        if !self.gravity.is_finite() {
            return invalid(format!("gravity must be finite, got {}", self.gravity));
        }

        let spawner = &self.spawner;
        if !(spawner.radius.is_finite() && spawner.radius > 0.0) {
            return invalid(format!("spawn radius must be positive, got {}", spawner.radius));
        }
        if !spawner.speed.is_finite() {
            return invalid(format!("spawn speed must be finite, got {}", spawner.speed));
        }
        if !spawner.offset_factor.is_finite() {
            return invalid(format!("spawn offset must be finite, got {}", spawner.offset_factor));
        }
        if let Some(max_speed) = spawner.max_speed {
            if max_speed.is_nan() || max_speed < 0.0 {
                return invalid(format!("max_speed must be non-negative, got {max_speed}"));
            }
        }
        match spawner.launch {
            LaunchPattern::Fixed(angle) if !angle.is_finite() => {
                return invalid(format!("launch angle must be finite, got {angle}"));
            }
            LaunchPattern::Sweep {
                base,
                amplitude,
                period,
            } if !(base.is_finite() && amplitude.is_finite() && period.is_finite())
                || period == 0.0 =>
            {
                return invalid(format!(
                    "launch sweep needs finite values and a non-zero period, got base {base}, amplitude {amplitude}, period {period}"
                ));
            }
            _ => {}
        }
        let largest_radius = match spawner.color_mode {
            ColorMode::Rainbow => spawner.radius,
            ColorMode::RandomHue {
                min_radius,
                max_radius,
            } => {
                if !(min_radius > 0.0 && max_radius.is_finite() && max_radius >= min_radius) {
                    return invalid(format!(
                        "random radius range [{min_radius}, {max_radius}] is empty or non-positive"
                    ));
                }
                max_radius
            }
        };

        match self.boundary {
            BoundaryPolicy::Rect {
                width,
                height,
                damping,
            } => {
                if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                    return invalid(format!("rect bounds must be finite and positive, got {width}x{height}"));
                }
                if !(0.0..=1.0).contains(&damping) {
                    return invalid(format!("wall damping must lie in [0, 1], got {damping}"));
                }
                if 2.0 * largest_radius > width.min(height) {
                    return invalid(format!(
                        "bodies of radius {largest_radius} do not fit a {width}x{height} rect"
                    ));
                }
            }
            BoundaryPolicy::Circle { center, radius } => {
                if !(center.is_finite() && radius.is_finite() && radius > 0.0) {
                    return invalid(format!(
                        "containment circle must be finite with a positive radius, got {center} r {radius}"
                    ));
                }
                if largest_radius >= radius {
                    return invalid(format!(
                        "bodies of radius {largest_radius} do not fit a circle of radius {radius}"
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_sub_steps_rejected() {
        let config = SolverConfig {
            sub_steps: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(config.validate(), Err(SolverError::InvalidConfig(_))));
    }

    #[test]
    fn sweep_matches_reference_formula() {
        let sweep = LaunchPattern::Sweep {
            base: PI * 0.5,
            amplitude: 1.0,
            period: 4.0,
        };
        let expected = (2.0f32 / 4.0).sin() + PI * 0.5;
        assert!((sweep.angle_at(2.0) - expected).abs() < 1e-6);
    }

    fn assert_rejected(config: SolverConfig) {
        assert!(
            matches!(config.validate(), Err(SolverError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
    }

    #[test]
    fn zero_sweep_period_rejected() {
        let mut config = SolverConfig::default();
        config.spawner.launch = LaunchPattern::Sweep {
            base: 0.0,
            amplitude: 1.0,
            period: 0.0,
        };
        assert_rejected(config);
    }

    #[test]
    fn non_finite_gravity_rejected() {
        assert_rejected(SolverConfig {
            gravity: Vec2::new(0.0, f32::NAN),
            ..SolverConfig::default()
        });
        assert_rejected(SolverConfig {
            gravity: Vec2::new(f32::INFINITY, 0.0),
            ..SolverConfig::default()
        });
    }

    #[test]
    fn non_finite_spawn_speed_rejected() {
        let mut config = SolverConfig::default();
        config.spawner.speed = f32::NAN;
        assert_rejected(config);
    }

    #[test]
    fn non_finite_scene_bounds_rejected() {
        assert_rejected(SolverConfig {
            scene_bounds: Vec2::new(f32::NAN, 100.0),
            ..SolverConfig::default()
        });
    }

    #[test]
    fn nan_rect_size_rejected() {
        assert_rejected(SolverConfig {
            boundary: BoundaryPolicy::Rect {
                width: f32::NAN,
                height: 100.0,
                damping: 0.5,
            },
            ..SolverConfig::default()
        });
        assert_rejected(SolverConfig {
            boundary: BoundaryPolicy::Rect {
                width: 100.0,
                height: f32::INFINITY,
                damping: 0.5,
            },
            ..SolverConfig::default()
        });
    }

    #[test]
    fn negative_max_speed_rejected() {
        let mut config = SolverConfig::default();
        config.spawner.max_speed = Some(-1.0);
        assert_rejected(config);

        config.spawner.max_speed = Some(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bodies_must_fit_the_rect() {
        let mut config = SolverConfig {
            boundary: BoundaryPolicy::Rect {
                width: 100.0,
                height: 10.0,
                damping: 0.5,
            },
            ..SolverConfig::default()
        };
        config.spawner.radius = 5.0;
        assert!(config.validate().is_ok());

        config.spawner.radius = 5.5;
        assert_rejected(config);
    }

    #[test]
    fn random_radius_must_fit_the_circle() {
        let mut config = SolverConfig {
            boundary: BoundaryPolicy::Circle {
                center: Vec2::splat(500.0),
                radius: 8.0,
            },
            ..SolverConfig::default()
        };
        config.spawner.radius = 2.0;
        assert!(config.validate().is_ok());

        config.spawner.color_mode = ColorMode::RandomHue {
            min_radius: 2.0,
            max_radius: 8.0,
        };
        assert_rejected(config);
    }

    #[test]
    fn empty_random_radius_range_rejected() {
        let mut config = SolverConfig::default();
        config.spawner.color_mode = ColorMode::RandomHue {
            min_radius: 5.0,
            max_radius: 2.0,
        };
        assert!(config.validate().is_err());
    }
}
