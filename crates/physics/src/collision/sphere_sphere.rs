//! Sphere-sphere collision detection and response

use glam::DVec3;

use super::Contact;
use crate::types::Sphere;

const POSITION_CORRECTION_PERCENT: f64 = 0.8;
const POSITION_CORRECTION_SLOP: f64 = 0.01;

/// Detect collision between two spheres
#[must_use]
pub fn detect_sphere_sphere_collision(
    index_a: usize,
    sphere_a: &Sphere,
    index_b: usize,
    sphere_b: &Sphere,
) -> Option<Contact> {
    let delta = sphere_b.pos - sphere_a.pos;
    let distance_squared = delta.length_squared();
    let min_distance = sphere_a.radius + sphere_b.radius;

    if distance_squared >= min_distance * min_distance {
        return None;
    }

    let distance = distance_squared.sqrt();
    // Coincident centres: pick +z
    let normal = if distance > 1e-9 {
        delta / distance
    } else {
        DVec3::Z
    };

    Some(Contact {
        body_a: index_a,
        body_b: index_b,
        point: sphere_a.pos + normal * sphere_a.radius,
        normal,
        depth: min_distance - distance,
    })
}

/// Apply impulse-based collision response between two spheres
pub fn resolve_sphere_sphere_collision(
    sphere_a: &mut Sphere,
    sphere_b: &mut Sphere,
    contact: &Contact,
    restitution: f64,
) {
    let inv_mass_sum = sphere_a.inv_mass() + sphere_b.inv_mass();
    let velocity_along_normal = (sphere_b.vel - sphere_a.vel).dot(contact.normal);

    // Separating bodies only get positional correction
    if velocity_along_normal < 0.0 {
        let j = -(1.0 + restitution) * velocity_along_normal / inv_mass_sum;
        let impulse = contact.normal * j;
        sphere_a.vel -= impulse * sphere_a.inv_mass();
        sphere_b.vel += impulse * sphere_b.inv_mass();
    }

    let correction_magnitude = (contact.depth - POSITION_CORRECTION_SLOP).max(0.0)
        / inv_mass_sum
        * POSITION_CORRECTION_PERCENT;
    let correction = contact.normal * correction_magnitude;

    sphere_a.pos -= correction * sphere_a.inv_mass();
    sphere_b.pos += correction * sphere_b.inv_mass();
}
