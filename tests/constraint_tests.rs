use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};
use verlet_sim::dynamics::{apply_boundary, clamp_to_rect, is_contained};
use verlet_sim::*;

fn stray_bodies(count: usize) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let position = Vec2::new(rng.gen_range(-200.0..1200.0), rng.gen_range(-200.0..1200.0));
            let mut body = Body::new(rng.gen_range(2.0..12.0), Color::WHITE, position);
            body.position_last = position - Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            body
        })
        .collect()
}

#[test]
fn rect_policy_contains_every_body() {
    let policy = BoundaryPolicy::rect(Vec2::new(1000.0, 800.0));
    for mut body in stray_bodies(200) {
        apply_boundary(&mut body, &policy);
        assert!(is_contained(&body, &policy, 1e-3), "{body:?}");
    }
}

#[test]
fn circle_policy_contains_every_body() {
    let policy = BoundaryPolicy::Circle {
        center: Vec2::new(500.0, 500.0),
        radius: 300.0,
    };
    for mut body in stray_bodies(200) {
        apply_boundary(&mut body, &policy);
        assert!(is_contained(&body, &policy, 1e-3), "{body:?}");
    }
}

#[test]
fn wall_hit_keeps_three_quarters_of_velocity() {
    let width = 100.0;
    let radius = 5.0;
    let boundary = width - radius;
    let mut body = Body::new(radius, Color::WHITE, Vec2::new(boundary + 1.0, 50.0));
    body.position_last = Vec2::new(boundary - 3.0, 50.0);

    clamp_to_rect(&mut body, Vec2::new(width, 100.0), 0.75);

    assert_eq!(body.position.x, boundary);
    // Velocity relative to the snapped position: 3 units per step before, 2.25 after.
    assert_relative_eq!(body.displacement().x, 0.75 * 3.0, epsilon = 1e-5);
    assert_eq!(body.displacement().y, 0.0);
}

#[test]
fn solver_keeps_fountain_inside_rect() {
    let mut solver = Solver::new(Vec2::new(400.0, 400.0), 190.0, 64).unwrap();
    let frame = 1.0 / 60.0;
    let mut since_last_spawn = 0.0;
    for _ in 0..240 {
        since_last_spawn += frame;
        let sub_dt = solver.sub_step_dt(frame);
        solver.spawn_body_from_center(0.05, &mut since_last_spawn, sub_dt);
        solver.update(frame).unwrap();
    }

    let policy = solver.config().boundary;
    for body in solver.bodies() {
        // Positions are read after the last integration, one sub-step past the clamp.
        assert!(is_contained(body, &policy, 5.0), "{body:?}");
    }
}

#[test]
fn solver_keeps_bodies_inside_circle() {
    let mut solver = Solver::new(Vec2::new(1000.0, 1000.0), 300.0, 64).unwrap();
    solver.use_circular_constraint().unwrap();
    for i in 0..30 {
        solver.add_body(Body::new(6.0, Color::WHITE, Vec2::new(300.0 + i as f32 * 13.8, 500.0)));
    }
    for _ in 0..120 {
        solver.update(1.0 / 60.0).unwrap();
    }

    let center = solver.center();
    for body in solver.bodies() {
        assert!(body.position.distance(center) <= 300.0 - body.radius + 5.0, "{body:?}");
    }
}

#[test]
fn invalid_boundary_is_refused() {
    let mut solver = Solver::new(Vec2::new(100.0, 100.0), 40.0, 8).unwrap();
    let before = solver.config().boundary;
    let result = solver.set_boundary(BoundaryPolicy::Circle {
        center: Vec2::ZERO,
        radius: -1.0,
    });
    assert!(matches!(result, Err(SolverError::InvalidConfig(_))));
    assert_eq!(solver.config().boundary, before);
}
