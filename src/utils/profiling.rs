use std::time::{Duration, Instant};

/// Timing and counters collected over the most recent `Solver::update`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolverProfiler {
    pub grid_build_time: Duration,
    pub collision_time: Duration,
    pub constraint_time: Duration,
    pub integrator_time: Duration,
    pub total_frame_time: Duration,

    pub body_count: usize,
    pub sub_steps: u32,
    pub grid_rebuilds: usize,
    pub candidates_checked: usize,
    pub collisions_resolved: usize,
}

impl SolverProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn share(part: Duration, total_us: f32) -> f32 {
        (part.as_micros() as f32 / total_us) * 100.0
    }

    pub fn report(&self) {
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        println!("--- Solver Profile ---");
        println!(
            "Bodies: {}, Sub-steps: {}, Candidates: {}, Collisions: {}",
            self.body_count, self.sub_steps, self.candidates_checked, self.collisions_resolved
        );
        println!(
            "Total Frame: {:.2} ms",
            self.total_frame_time.as_secs_f32() * 1000.0
        );
        println!(
            "  Grid build ({}x): {:.2} ms ({:.1}%)",
            self.grid_rebuilds,
            self.grid_build_time.as_secs_f32() * 1000.0,
            Self::share(self.grid_build_time, total_us)
        );
        println!(
            "  Collisions:      {:.2} ms ({:.1}%)",
            self.collision_time.as_secs_f32() * 1000.0,
            Self::share(self.collision_time, total_us)
        );
        println!(
            "  Constraint:      {:.2} ms ({:.1}%)",
            self.constraint_time.as_secs_f32() * 1000.0,
            Self::share(self.constraint_time, total_us)
        );
        println!(
            "  Integrator:      {:.2} ms ({:.1}%)",
            self.integrator_time.as_secs_f32() * 1000.0,
            Self::share(self.integrator_time, total_us)
        );
        println!("----------------------");
    }
}

/// Adds the time between construction and drop to `output`.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
