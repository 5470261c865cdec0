//! # Physics Simulation Core
//!
//! This module provides the main simulation structure and the stepping loop.
//! A step integrates all bodies, runs the broad and narrow phase, and hands
//! the contacts to the configured solver.

use glam::{DMat3, DVec3};

use crate::collision::detect_contacts;
use crate::error::PhysicsError;
use crate::integrator::integrate_spheres;
use crate::solver::{solve_direct, solve_sequential};
use crate::types::{PhysParams, SolverDiagnostics, SolverKind, Sphere};

/// Main physics simulation container
#[derive(Clone, Debug, Default)]
pub struct PhysicsSim {
    pub spheres: Vec<Sphere>,
    pub params: PhysParams,
    time: f64,
    diagnostics: Option<SolverDiagnostics>,
}

impl PhysicsSim {
    /// Create a new empty simulation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated seconds elapsed.
    #[must_use]
    pub fn sim_time(&self) -> f64 {
        self.time
    }

    /// Add an external force to a body for the next step only.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::BodyIndexOutOfRange`]
    pub fn add_force(&mut self, index: usize, force: DVec3) -> Result<(), PhysicsError> {
        self.sphere_mut(index)?.force += force;
        Ok(())
    }

    /// Add an external torque to a body for the next step only.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::BodyIndexOutOfRange`]
    pub fn add_torque(&mut self, index: usize, torque: DVec3) -> Result<(), PhysicsError> {
        self.sphere_mut(index)?.torque += torque;
        Ok(())
    }

    /// Diagnostics of the last contact solve, if the active solver reports them.
    #[must_use]
    pub fn diagnostics(&self) -> Option<SolverDiagnostics> {
        self.diagnostics
    }

    /// World-frame inertia tensor of a body.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::BodyIndexOutOfRange`]
    pub fn world_inertia_matrix(&self, index: usize) -> Result<DMat3, PhysicsError> {
        Ok(self.sphere(index)?.world_inertia())
    }

    /// Kinetic plus gravitational potential energy (`-m g . p`) of a body.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::BodyIndexOutOfRange`]
    pub fn world_energy(&self, index: usize) -> Result<f64, PhysicsError> {
        Ok(self.sphere(index)?.energy(self.params.gravity))
    }

    /// Total energy of all bodies.
    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.spheres
            .iter()
            .map(|s| s.energy(self.params.gravity))
            .sum()
    }

    /// Execute one physics step of `params.dt`.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::NoSpheres`] for an empty world and
    /// [`PhysicsError::InvalidTimeStep`] unless `dt` is positive and finite.
    pub fn step(&mut self) -> Result<(), PhysicsError> {
        if self.spheres.is_empty() {
            return Err(PhysicsError::NoSpheres);
        }
        let dt = self.params.dt;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        // 1. Apply forces and integrate
        integrate_spheres(&mut self.spheres, self.params.gravity, dt);

        // 2. Detect contacts
        let contacts = detect_contacts(&self.spheres);
        if !contacts.is_empty() {
            tracing::trace!(contacts = contacts.len(), time = self.time, "solving contacts");
        }

        // 3. Solve
        let solver = self.params.solver;
        self.diagnostics = match solver.kind {
            SolverKind::Sequential => {
                Some(solve_sequential(&mut self.spheres, &contacts, &solver, dt))
            }
            SolverKind::Direct => {
                solve_direct(&mut self.spheres, &contacts, &solver);
                None
            }
        };

        self.time += dt;
        Ok(())
    }

    /// Run simulation for multiple steps
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`PhysicsSim::step`].
    pub fn run(&mut self, steps: usize) -> Result<(), PhysicsError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_refuses_to_step() {
        let mut sim = PhysicsSim::new();
        assert_eq!(sim.step(), Err(PhysicsError::NoSpheres));
    }

    #[test]
    fn invalid_dt_is_reported() {
        let mut sim = PhysicsSim::sphere_stack(1, 0.5);
        sim.params.dt = 0.0;
        assert_eq!(sim.run(1), Err(PhysicsError::InvalidTimeStep(0.0)));
        assert_eq!(sim.sim_time(), 0.0);
    }

    #[test]
    fn diagnostics_follow_solver_kind() {
        let mut sim = PhysicsSim::sphere_stack(2, 0.5);
        sim.run(1).unwrap();
        assert!(sim.diagnostics().is_some());

        sim.params.solver.kind = SolverKind::Direct;
        sim.run(1).unwrap();
        assert!(sim.diagnostics().is_none());
    }

    #[test]
    fn potential_energy_uses_gravity() {
        let mut sim = PhysicsSim::sphere_stack(1, 0.5);
        sim.params.gravity = DVec3::new(0.0, 0.0, -2.0);
        assert!((sim.world_energy(0).unwrap() - 1.0).abs() < 1e-12);
        assert!((sim.total_energy() - 1.0).abs() < 1e-12);
    }
}
