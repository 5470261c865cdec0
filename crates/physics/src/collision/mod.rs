//! # Collision Detection and Response
//!
//! Broad phase over sphere bounds, sphere-sphere narrow phase, and the
//! single-pass impulse response used by the direct solver.

mod broad_phase;
mod sphere_sphere;

pub use broad_phase::*;
pub use sphere_sphere::*;

use glam::DVec3;

use crate::types::Sphere;

/// Contact information for collision response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the first body; always smaller than `body_b`
    pub body_a: usize,
    pub body_b: usize,
    /// Contact point in world space
    pub point: DVec3,
    /// Contact normal (from body A to body B)
    pub normal: DVec3,
    /// Penetration depth
    pub depth: f64,
}

/// All penetrating sphere pairs, ordered by `(body_a, body_b)`.
#[must_use]
pub fn detect_contacts(spheres: &[Sphere]) -> Vec<Contact> {
    potential_collision_pairs(spheres)
        .into_iter()
        .filter_map(|(i, j)| detect_sphere_sphere_collision(i, &spheres[i], j, &spheres[j]))
        .collect()
}

/// Mutable access to two distinct spheres, `a < b`.
pub(crate) fn pair_mut(spheres: &mut [Sphere], a: usize, b: usize) -> (&mut Sphere, &mut Sphere) {
    debug_assert!(a < b);
    let (head, tail) = spheres.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}
