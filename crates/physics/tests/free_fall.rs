use glam::DVec3;
use physics::PhysicsSim;

#[test]
fn sphere_free_fall_matches_analytic() {
    let mut sim = PhysicsSim::sphere_stack(1, 0.5);
    sim.params.gravity = DVec3::new(0.0, 0.0, -9.81);
    let dt = 0.001;
    let steps = 1000;
    sim.params.dt = dt;
    sim.run(steps).unwrap();

    // analytic: h = h0 - 1/2 g t^2; semi-implicit Euler is off by 1/2 g t dt
    let t = dt * steps as f64;
    let expected = 0.5 - 0.5 * 9.81 * t * t;
    let diff = (sim.spheres[0].pos.z - expected).abs();
    assert!(diff < 0.5 * 9.81 * t * dt + 1e-6, "diff={diff}");
    assert!((sim.sim_time() - t).abs() < 1e-9);
}

#[test]
fn uniform_gravity_moves_stack_rigidly() {
    let mut sim = PhysicsSim::sphere_stack(5, 0.5);
    sim.params.gravity = DVec3::new(0.0, 0.0, -1.0);
    sim.run(2000).unwrap();

    for pair in sim.spheres.windows(2) {
        assert!(((pair[1].pos.z - pair[0].pos.z) - 1.0).abs() < 1e-6);
    }
    let diag = sim.diagnostics().unwrap();
    assert!(diag.rms_error.total < 1e-6);
}
