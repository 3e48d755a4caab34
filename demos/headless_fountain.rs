use verlet_sim::*;

fn main() {
    let frame = 1.0 / 60.0;
    let mut solver = Solver::new(Vec2::new(1000.0, 1000.0), 475.0, 2048).expect("valid solver");
    solver.set_parallel_enabled(true);

    let spawn_interval = 0.05;
    let mut since_last_spawn = 0.0;

    for frame_index in 1..=600 {
        since_last_spawn += frame;
        let sub_dt = solver.sub_step_dt(frame);
        solver.spawn_body_from_center(spawn_interval, &mut since_last_spawn, sub_dt);

        if let Err(err) = solver.update(frame) {
            eprintln!("frame {frame_index}: {err}");
            continue;
        }

        if frame_index % 60 == 0 {
            println!("t = {:.1} s, bodies: {}", solver.time(), solver.body_count());
            solver.profiler().report();
        }
    }
}
