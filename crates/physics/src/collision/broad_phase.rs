//! Broad-phase collision detection over sphere bounding boxes

use crate::types::Sphere;

/// Index pairs `(i, j)`, `i < j`, whose bounding boxes overlap.
#[must_use]
pub fn potential_collision_pairs(spheres: &[Sphere]) -> Vec<(usize, usize)> {
    let bounds: Vec<_> = spheres.iter().map(Sphere::bounds).collect();
    let mut pairs = Vec::new();

    for (i, a) in bounds.iter().enumerate() {
        for (offset, b) in bounds[i + 1..].iter().enumerate() {
            if a.overlaps(b) {
                pairs.push((i, i + 1 + offset));
            }
        }
    }

    pairs
}
