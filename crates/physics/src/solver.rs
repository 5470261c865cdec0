//! # Contact Solvers
//!
//! [`solve_sequential`] runs projected Gauss-Seidel sweeps over the contact
//! normal rows, accumulating a non-negative impulse per contact, and reports
//! how far the final sweep was from convergence. [`solve_direct`] applies the
//! single-pass response from [`crate::collision`].

use crate::collision::{pair_mut, resolve_sphere_sphere_collision, Contact};
use crate::types::{ConstraintErrors, SolverDiagnostics, SolverParams, Sphere};

/// Sequential impulse solve over `contacts`.
///
/// Each contact targets a separating normal velocity of
/// `max(erp * depth / dt, -restitution * v_n0)`. Sweeps stop after
/// `params.iterations` or once the RMS impulse change is within
/// `params.tolerance`. Contacts carry no friction rows, so the friction
/// component of the diagnostics is always zero.
pub fn solve_sequential(
    spheres: &mut [Sphere],
    contacts: &[Contact],
    params: &SolverParams,
    dt: f64,
) -> SolverDiagnostics {
    if contacts.is_empty() {
        return SolverDiagnostics::default();
    }

    let targets: Vec<f64> = contacts
        .iter()
        .map(|c| {
            let approach = (spheres[c.body_b].vel - spheres[c.body_a].vel).dot(c.normal);
            (params.erp * c.depth / dt).max(-params.restitution * approach)
        })
        .collect();
    let mut accumulated = vec![0.0_f64; contacts.len()];
    let rows = contacts.len() as f64;

    let mut rms_error = 0.0;
    let mut iterations = 0;
    for _ in 0..params.iterations.max(1) {
        iterations += 1;
        let mut sum_sq = 0.0;
        for (k, contact) in contacts.iter().enumerate() {
            let (a, b) = pair_mut(spheres, contact.body_a, contact.body_b);
            let inv_mass_sum = a.inv_mass() + b.inv_mass();
            let vn = (b.vel - a.vel).dot(contact.normal);

            let proposed = (accumulated[k] + (targets[k] - vn) / inv_mass_sum).max(0.0);
            let applied = proposed - accumulated[k];
            accumulated[k] = proposed;

            a.vel -= contact.normal * (applied * a.inv_mass());
            b.vel += contact.normal * (applied * b.inv_mass());
            sum_sq += applied * applied;
        }
        rms_error = (sum_sq / rows).sqrt();
        if rms_error <= params.tolerance {
            break;
        }
    }

    // Complementarity: an active contact must hit its target exactly, an
    // inactive one may only separate faster than it.
    let residual_sq: f64 = contacts
        .iter()
        .zip(&targets)
        .zip(&accumulated)
        .map(|((c, target), lambda)| {
            let vn = (spheres[c.body_b].vel - spheres[c.body_a].vel).dot(c.normal);
            let gap = vn - target;
            let violation = if *lambda > 0.0 { gap } else { gap.min(0.0) };
            violation * violation
        })
        .sum();

    SolverDiagnostics {
        rms_error: ConstraintErrors::new(rms_error, 0.0),
        constraint_residual: ConstraintErrors::new((residual_sq / rows).sqrt(), 0.0),
        iterations,
        contacts: contacts.len(),
    }
}

/// One impulse and positional correction per contact, in order.
pub fn solve_direct(spheres: &mut [Sphere], contacts: &[Contact], params: &SolverParams) {
    for contact in contacts {
        let (a, b) = pair_mut(spheres, contact.body_a, contact.body_b);
        resolve_sphere_sphere_collision(a, b, contact, params.restitution);
    }
}
