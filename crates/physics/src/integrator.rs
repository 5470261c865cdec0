//! # Physics Integration
//!
//! Semi-implicit Euler for translation and explicit Euler on the rigid-body
//! (Euler) equations for rotation.

use glam::{DQuat, DVec3};

use crate::types::Sphere;

/// Advance every sphere by `dt` under gravity and its accumulated external
/// force and torque. Accumulators are cleared afterwards.
pub fn integrate_spheres(spheres: &mut [Sphere], gravity: DVec3, dt: f64) {
    for sphere in spheres.iter_mut() {
        let acceleration = gravity + sphere.force / sphere.mass;
        sphere.vel += acceleration * dt;
        sphere.pos += sphere.vel * dt;

        integrate_rotation(sphere, dt);

        sphere.force = DVec3::ZERO;
        sphere.torque = DVec3::ZERO;
    }
}

/// `I dw/dt = tau - w x (I w)` in the world frame, then rotate the
/// orientation by `w dt`.
fn integrate_rotation(sphere: &mut Sphere, dt: f64) {
    let inertia = sphere.world_inertia();
    let momentum = inertia * sphere.angular_vel;
    let gyroscopic = sphere.angular_vel.cross(momentum);
    sphere.angular_vel += inertia.inverse() * (sphere.torque - gyroscopic) * dt;

    let spin = DQuat::from_scaled_axis(sphere.angular_vel * dt);
    sphere.orientation = (spin * sphere.orientation).normalize();
}
