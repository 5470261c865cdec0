//! [`TrackedWorld`] adapter over the CPU sphere engine.

use glam::DVec3;
use physics::{solid_sphere_inertia, PhysicsError, PhysicsSim};

use crate::error::AccuracyError;
use crate::probe::{
    DiagnosticSample, Quantity, Sample, SampleSource, SolverSettings, TrackedWorld, WorldError,
};
use crate::scenario::{SphereStackConfig, SPHERE_RADIUS, STACK_SIZE, TRACKED_BODY};

/// A [`PhysicsSim`] observed through one named body.
#[derive(Clone, Debug)]
pub struct SphereStackWorld {
    sim: PhysicsSim,
    body: usize,
}

impl SphereStackWorld {
    /// Track the body called `name` in `sim`.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] when no such body exists.
    pub fn new(sim: PhysicsSim, name: &str) -> Result<Self, PhysicsError> {
        let body = sim.body_index(name)?;
        Ok(Self { sim, body })
    }

    /// Five stacked spheres with the top one re-massed per `config`.
    ///
    /// The solver kind is selected here; the remaining solver settings are
    /// applied later through [`TrackedWorld::configure_solver`].
    ///
    /// # Errors
    ///
    /// [`AccuracyError::Physics`] for a non-positive or non-finite mass.
    pub fn sphere_stack(config: &SphereStackConfig) -> Result<Self, AccuracyError> {
        let mut sim = PhysicsSim::sphere_stack(STACK_SIZE, SPHERE_RADIUS);
        sim.params.gravity = DVec3::new(0.0, 0.0, config.gravity);
        sim.params.solver.kind = config.solver;

        let mut world = Self::new(sim, TRACKED_BODY)?;
        world.sim.set_mass(world.body, config.mass)?;
        world
            .sim
            .set_inertia(world.body, solid_sphere_inertia(config.mass, SPHERE_RADIUS))?;

        tracing::debug!(
            solver = %config.solver,
            mass = config.mass,
            gravity = config.gravity,
            "built sphere stack"
        );
        Ok(world)
    }

    #[must_use]
    pub fn sim(&self) -> &PhysicsSim {
        &self.sim
    }

    fn tracked(&self) -> &physics::Sphere {
        &self.sim.spheres[self.body]
    }
}

impl SampleSource for SphereStackWorld {
    fn sim_time(&self) -> f64 {
        self.sim.sim_time()
    }

    fn sample(&self, quantity: Quantity) -> Sample {
        let body = self.tracked();
        match quantity {
            Quantity::Position => Sample::Vector(body.pos),
            Quantity::LinearVelocity => Sample::Vector(body.vel),
            Quantity::AngularVelocity => Sample::Vector(body.angular_vel),
            Quantity::AngularMomentum => Sample::Vector(body.angular_momentum()),
            Quantity::Energy => Sample::Scalar(body.energy(self.sim.params.gravity)),
        }
    }

    fn diagnostics(&self) -> Option<DiagnosticSample> {
        self.sim.diagnostics().map(|d| DiagnosticSample {
            rms_error: d.rms_error.total,
            constraint_residual: d.constraint_residual.total,
        })
    }
}

impl TrackedWorld for SphereStackWorld {
    fn configure_solver(&mut self, settings: SolverSettings) -> Result<(), WorldError> {
        if !(settings.dt.is_finite() && settings.dt > 0.0) {
            return Err(PhysicsError::InvalidTimeStep(settings.dt).into());
        }
        let solver = &mut self.sim.params.solver;
        tracing::debug!(
            previous = solver.iterations,
            iterations = settings.iterations,
            dt = settings.dt,
            tolerance = settings.tolerance,
            "configuring solver"
        );
        solver.iterations = settings.iterations;
        solver.tolerance = settings.tolerance;
        self.sim.params.dt = settings.dt;
        Ok(())
    }

    fn apply_force(&mut self, force: DVec3) -> Result<(), WorldError> {
        self.sim.add_force(self.body, force)?;
        Ok(())
    }

    fn step(&mut self) -> Result<(), WorldError> {
        self.sim.step()?;
        Ok(())
    }
}
