use std::time::Instant;

use glam::Vec2;
use log::{debug, warn};

use crate::{
    collision::{pair_mut, resolve_collision, SpatialHashGrid},
    config::{BoundaryPolicy, GridRebuild, SolverConfig},
    core::body::Body,
    dynamics::{apply_boundary, Integrator, Spawner},
    error::{Result, SolverError},
    utils::{
        logging::{warn_if_frame_budget_exceeded, PhaseTrace},
        profiling::{PhaseTimer, SolverProfiler},
    },
};

/// Owns the body population and advances it with sub-stepped Verlet integration.
///
/// Each [`update`](Self::update) is split into `sub_steps` equal sub-steps. A
/// sub-step applies gravity, resolves collisions using the spatial hash as a
/// candidate filter, enforces the boundary policy, then integrates.
pub struct Solver {
    bodies: Vec<Body>,
    grid: SpatialHashGrid,
    /// Position snapshot the grid is built from.
    positions: Vec<Vec2>,
    config: SolverConfig,
    center: Vec2,
    constraint_radius: f32,
    spawner: Spawner,
    integrator: Integrator,
    time: f32,
    profiler: SolverProfiler,
}

impl Solver {
    /// Solver for a scene of `scene_bounds`, clamped to the scene rectangle.
    ///
    /// `constraint_radius` is kept for [`use_circular_constraint`](Self::use_circular_constraint);
    /// `max_body_capacity_hint` sizes the spatial hash up front.
    pub fn new(
        scene_bounds: Vec2,
        constraint_radius: f32,
        max_body_capacity_hint: usize,
    ) -> Result<Self> {
        let config = SolverConfig {
            scene_bounds,
            boundary: BoundaryPolicy::rect(scene_bounds),
            capacity_hint: max_body_capacity_hint,
            ..SolverConfig::default()
        };
        let mut solver = Self::with_config(config)?;
        solver.constraint_radius = constraint_radius;
        Ok(solver)
    }

    pub fn with_config(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let grid = SpatialHashGrid::new(config.grid_spacing, config.capacity_hint.max(1))?;
        let integrator = Integrator::new();

        let constraint_radius = match config.boundary {
            BoundaryPolicy::Circle { radius, .. } => radius,
            BoundaryPolicy::Rect { width, height, .. } => 0.5 * width.min(height),
        };

        Ok(Self {
            bodies: Vec::with_capacity(config.capacity_hint),
            grid,
            positions: Vec::with_capacity(config.capacity_hint),
            center: config.scene_bounds * 0.5,
            constraint_radius,
            spawner: Spawner::new(config.spawner),
            integrator,
            time: 0.0,
            profiler: SolverProfiler::default(),
            config,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Accumulated simulated time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Timings and counters of the last successful update.
    pub fn profiler(&self) -> &SolverProfiler {
        &self.profiler
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.integrator.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.integrator.parallel()
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Replaces the boundary policy after validating it.
    pub fn set_boundary(&mut self, boundary: BoundaryPolicy) -> Result<()> {
        let candidate = SolverConfig {
            boundary,
            ..self.config
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// Switches to circular containment of `constraint_radius` around the scene center.
    pub fn use_circular_constraint(&mut self) -> Result<()> {
        self.set_boundary(BoundaryPolicy::circle_from(
            self.config.scene_bounds,
            self.constraint_radius,
        ))
    }

    /// Switches back to the damped rectangular clamp over the scene bounds.
    pub fn use_rect_constraint(&mut self) -> Result<()> {
        self.set_boundary(BoundaryPolicy::rect(self.config.scene_bounds))
    }

    /// Length of one sub-step for a frame of `dt`. Pass it to
    /// [`spawn_body_from_center`](Self::spawn_body_from_center) so the launch
    /// velocity is encoded against the step that integrates it.
    pub fn sub_step_dt(&self, dt: f32) -> f32 {
        dt / self.config.sub_steps as f32
    }

    /// Appends a body and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Emits one body from the spawn point once `elapsed` reaches `interval`.
    ///
    /// On spawn `elapsed` is reset to zero and the new body's index is
    /// returned. Nothing happens while the interval has not elapsed or the
    /// population cap is reached.
    pub fn spawn_body_from_center(
        &mut self,
        interval: f32,
        elapsed: &mut f32,
        dt: f32,
    ) -> Option<usize> {
        if *elapsed < interval {
            return None;
        }
        if let Some(max_bodies) = self.config.max_bodies {
            if self.bodies.len() >= max_bodies {
                debug!("Population cap of {max_bodies} reached, skipping spawn");
                return None;
            }
        }

        let body = self.spawner.make_body(self.center, self.time, dt);
        *elapsed = 0.0;
        Some(self.add_body(body))
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` is rejected without touching any state.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("Rejecting solver update with dt = {dt}");
            return Err(SolverError::InvalidTimeStep(dt));
        }

        let frame_start = Instant::now();
        self.profiler.reset();
        self.profiler.body_count = self.bodies.len();
        self.profiler.sub_steps = self.config.sub_steps;

        self.time += dt;
        let sub_dt = self.sub_step_dt(dt);

        self.ensure_grid_capacity();
        if self.config.grid_rebuild == GridRebuild::PerUpdate {
            self.rebuild_grid()?;
        }

        for _ in 0..self.config.sub_steps {
            if self.config.grid_rebuild == GridRebuild::PerSubStep {
                self.rebuild_grid()?;
            }
            self.apply_gravity();
            self.check_collisions();
            self.apply_constraint();
            self.update_bodies(sub_dt);
        }

        self.profiler.total_frame_time = frame_start.elapsed();
        warn_if_frame_budget_exceeded(
            self.profiler.total_frame_time,
            self.config.frame_budget_ms,
        );
        Ok(())
    }

    /// Grows the grid ahead of a population that outgrew it.
    fn ensure_grid_capacity(&mut self) {
        let needed = self.bodies.len();
        if needed <= self.grid.capacity() {
            return;
        }
        let grown = needed.max(self.grid.capacity() * 2);
        debug!(
            "Growing spatial hash from {} to {} objects",
            self.grid.capacity(),
            grown
        );
        self.grid.reserve(grown);
    }

    fn rebuild_grid(&mut self) -> Result<()> {
        let _trace = PhaseTrace::new("grid", self.bodies.len());
        let _timer = PhaseTimer::new(&mut self.profiler.grid_build_time);
        self.positions.clear();
        self.positions
            .extend(self.bodies.iter().map(|body| body.position));
        self.grid.create(&self.positions)?;
        self.profiler.grid_rebuilds += 1;
        Ok(())
    }

    fn apply_gravity(&mut self) {
        self.integrator
            .apply_gravity(&mut self.bodies, self.config.gravity);
    }

    fn check_collisions(&mut self) {
        let _trace = PhaseTrace::new("collisions", self.bodies.len());
        let _timer = PhaseTimer::new(&mut self.profiler.collision_time);
        let (checked, resolved) = resolve_all(
            &mut self.bodies,
            &mut self.grid,
            self.config.query_radius_factor,
            self.config.collision_response,
        );
        self.profiler.candidates_checked += checked;
        self.profiler.collisions_resolved += resolved;
    }

    fn apply_constraint(&mut self) {
        let _trace = PhaseTrace::new("constraint", self.bodies.len());
        let _timer = PhaseTimer::new(&mut self.profiler.constraint_time);
        let boundary = self.config.boundary;
        for body in &mut self.bodies {
            apply_boundary(body, &boundary);
        }
    }

    fn update_bodies(&mut self, dt: f32) {
        let _trace = PhaseTrace::new("integrate", self.bodies.len());
        let _timer = PhaseTimer::new(&mut self.profiler.integrator_time);
        self.integrator.integrate(&mut self.bodies, dt);
    }
}

/// One collision pass over every body in collection order.
///
/// Each body queries the grid for candidates within `radius * query_factor`
/// and resolves against every candidate other than itself. Returns the number
/// of candidates tested and the number of corrections applied.
pub fn resolve_all(
    bodies: &mut [Body],
    grid: &mut SpatialHashGrid,
    query_factor: f32,
    response: f32,
) -> (usize, usize) {
    let mut checked = 0;
    let mut resolved = 0;

    for i in 0..bodies.len() {
        let Body {
            position, radius, ..
        } = bodies[i];
        let candidates = grid.query_region(position, radius * query_factor);

        for &j in candidates {
            if j == i {
                continue;
            }
            checked += 1;
            if let Some((a, b)) = pair_mut(bodies, i, j) {
                if resolve_collision(a, b, response) {
                    resolved += 1;
                }
            }
        }
    }

    (checked, resolved)
}
