use log::{Level, log_enabled, warn};
use std::time::{Duration, Instant};

/// Trace span around one solver phase, tagged with the body count it ran over.
///
/// Only emits at `Trace` level; the duration is logged when the span drops.
pub struct PhaseTrace {
    phase: &'static str,
    bodies: usize,
    start: Instant,
}

impl PhaseTrace {
    pub fn new(phase: &'static str, bodies: usize) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("[{phase}] begin, {bodies} bodies");
        }
        Self {
            phase,
            bodies,
            start: Instant::now(),
        }
    }

    pub fn phase(&self) -> &'static str {
        self.phase
    }
}

impl Drop for PhaseTrace {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            let micros = self.start.elapsed().as_micros();
            let per_body = micros as f64 / self.bodies.max(1) as f64;
            log::trace!(
                "[{}] done in {micros} µs ({per_body:.3} µs/body)",
                self.phase
            );
        }
    }
}

/// Warns when an update took longer than the frame budget. Returns whether it did.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Solver update exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}
