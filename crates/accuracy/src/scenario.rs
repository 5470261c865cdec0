//! # Sphere-Stack Accuracy Scenario
//!
//! Five unit spheres are stacked along `+z` with no ground plane. The top
//! sphere is re-massed, optionally pushed with a constant force, and the world
//! is stepped for a fixed simulated duration. Every step the drift of the top
//! sphere's position, velocity, angular momentum and energy from their initial
//! values is streamed into accumulators, together with the solver's own
//! convergence diagnostics when the engine reports them.

use std::time::Instant;

use glam::DVec3;
use physics::SolverKind;
use serde::Serialize;
use stats::{SignalStats, StatisticKind, Vector3Stats};

use crate::error::AccuracyError;
use crate::probe::{sample_scalar, sample_vector, Quantity, SolverSettings, TrackedWorld};
use crate::recorder::Recorder;
use crate::world::SphereStackWorld;

pub const STACK_SIZE: usize = 5;
pub const SPHERE_RADIUS: f64 = 0.5;
pub const TRACKED_BODY: &str = "sphere_5";
/// Statistics collected for every tracked error signal.
pub const STATISTICS: &str = "MaxAbs,Variance,Mean";

const PROGRESS_INTERVAL: u64 = 1000;

/// Parameters of one sphere-stack run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereStackConfig {
    pub solver: SolverKind,
    pub iterations: u32,
    pub dt: f64,
    /// Mass of the top sphere; the others keep mass 1.
    pub mass: f64,
    /// z component of gravity.
    pub gravity: f64,
    /// z component of the force applied to the top sphere every step.
    pub force: f64,
    pub tolerance: f64,
    /// Simulated seconds.
    pub duration: f64,
}

impl Default for SphereStackConfig {
    fn default() -> Self {
        Self {
            solver: SolverKind::Sequential,
            iterations: 50,
            dt: 0.001,
            mass: 1.0,
            gravity: -1.0,
            force: 0.0,
            tolerance: 0.0,
            duration: 10.0,
        }
    }
}

impl SphereStackConfig {
    /// Top-sphere masses of the standard sweep.
    pub const MASS_SWEEP: [f64; 6] = [0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0];

    /// One copy of `self` per mass in [`Self::MASS_SWEEP`].
    #[must_use]
    pub fn mass_sweep(&self) -> Vec<Self> {
        Self::MASS_SWEEP
            .iter()
            .map(|&mass| Self { mass, ..*self })
            .collect()
    }

    /// Small step under strong gravity with unit masses.
    #[must_use]
    pub fn high_gravity(solver: SolverKind) -> Self {
        Self {
            solver,
            dt: 3.0e-4,
            gravity: -100.0,
            ..Self::default()
        }
    }

    /// Number of steps covering `duration`, rounded up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> u64 {
        (self.duration / self.dt).ceil() as u64
    }

    /// # Errors
    ///
    /// [`AccuracyError::InvalidConfig`] naming the first bad parameter.
    pub fn validate(&self) -> Result<(), AccuracyError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(AccuracyError::InvalidConfig("dt must be positive and finite"));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(AccuracyError::InvalidConfig(
                "duration must be positive and finite",
            ));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(AccuracyError::InvalidConfig("mass must be positive and finite"));
        }
        if self.iterations == 0 {
            return Err(AccuracyError::InvalidConfig("iterations must be at least 1"));
        }
        if !(self.gravity.is_finite() && self.force.is_finite() && self.tolerance >= 0.0) {
            return Err(AccuracyError::InvalidConfig(
                "gravity and force must be finite, tolerance non-negative",
            ));
        }
        Ok(())
    }

    /// Record the run parameters under their report names.
    pub fn record_properties<R: Recorder + ?Sized>(&self, recorder: &mut R) {
        recorder.record_property("engine", self.solver.name());
        recorder.record_property("iters", &self.iterations.to_string());
        recorder.record_property("dt", &self.dt.to_string());
        recorder.record_value("mass", self.mass);
        recorder.record_property("gravity", &self.gravity.to_string());
        recorder.record_property("force", &self.force.to_string());
        recorder.record_property("tolerance", &self.tolerance.to_string());
    }

    fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            dt: self.dt,
            iterations: self.iterations,
            tolerance: self.tolerance,
        }
    }
}

/// Accumulated errors and timings of one run.
#[derive(Clone, Debug, Serialize)]
pub struct AccuracyReport {
    pub steps: u64,
    pub wall_time: f64,
    pub sim_time: f64,
    pub time_ratio: f64,
    pub energy0: f64,
    pub ang_momentum0: f64,
    pub lin_position: Vector3Stats,
    pub lin_velocity: Vector3Stats,
    pub ang_momentum: Vector3Stats,
    pub energy: SignalStats,
    pub rms_error: SignalStats,
    pub constraint_residual: SignalStats,
}

impl AccuracyReport {
    /// Everything but `wallTime`, which [`measure`] records before its
    /// duration check.
    fn record<R: Recorder + ?Sized>(&self, recorder: &mut R) {
        recorder.record_value("simTime", self.sim_time);
        recorder.record_value("timeRatio", self.time_ratio);
        recorder.record_value("energy0", self.energy0);
        recorder.record_stats("energyError", &self.energy);
        recorder.record_value("angMomentum0", self.ang_momentum0);
        recorder.record_stats("angMomentumErr", self.ang_momentum.mag());
        recorder.record_stats("linPositionErr", self.lin_position.mag());
        recorder.record_stats("linVelocityErr", self.lin_velocity.mag());
        recorder.record_stats("rmsErrorTotal", &self.rms_error);
        recorder.record_stats("constraintResidualTotal", &self.constraint_residual);
    }
}

/// `(value - reference) / reference`, or the plain difference when the
/// reference is zero.
fn relative(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        value - reference
    } else {
        (value - reference) / reference
    }
}

/// Run `config` against an already built `world` and record the results.
///
/// Initial conditions are read before the solver settings are applied.
///
/// # Errors
///
/// Fails on an invalid `config`, a world error, a sample of the wrong shape,
/// or when the simulated time ends more than `1.1 * dt` away from
/// `config.duration`. Records made before a failure are kept.
pub fn measure<W, R>(
    world: &mut W,
    config: &SphereStackConfig,
    recorder: &mut R,
) -> Result<AccuracyReport, AccuracyError>
where
    W: TrackedWorld + ?Sized,
    R: Recorder + ?Sized,
{
    config.validate()?;

    let t0 = world.sim_time();
    let p0 = sample_vector(&*world, Quantity::Position)?;
    let v0 = sample_vector(&*world, Quantity::LinearVelocity)?;
    let h0 = sample_vector(&*world, Quantity::AngularMomentum)?;
    let h0_mag = h0.length();
    let e0 = sample_scalar(&*world, Quantity::Energy)?;

    let mut lin_position = Vector3Stats::with_statistics(STATISTICS)?;
    let mut lin_velocity = Vector3Stats::with_statistics(STATISTICS)?;
    let mut ang_momentum = Vector3Stats::with_statistics(STATISTICS)?;
    let mut energy = SignalStats::with_statistics(STATISTICS)?;
    let mut rms_error = SignalStats::with_statistics(STATISTICS)?;
    let mut constraint_residual = SignalStats::with_statistics(STATISTICS)?;

    world
        .configure_solver(config.solver_settings())
        .map_err(AccuracyError::World)?;

    let steps = config.steps();
    let force = DVec3::new(0.0, 0.0, config.force);
    tracing::info!(
        engine = %config.solver,
        mass = config.mass,
        steps,
        "starting sphere stack run"
    );

    let start = Instant::now();
    for i in 0..steps {
        world.apply_force(force).map_err(AccuracyError::World)?;
        world.step().map_err(AccuracyError::World)?;

        let v = sample_vector(&*world, Quantity::LinearVelocity)?;
        lin_velocity.insert_data(v - v0);

        let p = sample_vector(&*world, Quantity::Position)?;
        lin_position.insert_data(p - p0);

        let h = sample_vector(&*world, Quantity::AngularMomentum)?;
        ang_momentum.insert_data(if h0_mag == 0.0 { h - h0 } else { (h - h0) / h0_mag });

        let e = sample_scalar(&*world, Quantity::Energy)?;
        energy.insert_data(relative(e, e0));

        if let Some(diag) = world.diagnostics() {
            rms_error.insert_data(diag.rms_error);
            constraint_residual.insert_data(diag.constraint_residual);
        }

        if (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::debug!(
                step = i + 1,
                sim_time = world.sim_time() - t0,
                energy_error = ?energy.value(StatisticKind::MaxAbs),
                "progress"
            );
        }
    }
    let wall_time = start.elapsed().as_secs_f64();
    recorder.record_value("wallTime", wall_time);

    let sim_time = world.sim_time() - t0;
    let tolerance = config.dt * 1.1;
    if (sim_time - config.duration).abs() > tolerance {
        return Err(AccuracyError::SimDurationDrift {
            expected: config.duration,
            actual: sim_time,
            tolerance,
        });
    }
    let report = AccuracyReport {
        steps,
        wall_time,
        sim_time,
        time_ratio: wall_time / sim_time,
        energy0: e0,
        ang_momentum0: h0_mag,
        lin_position,
        lin_velocity,
        ang_momentum,
        energy,
        rms_error,
        constraint_residual,
    };
    report.record(recorder);

    tracing::info!(
        wall_time,
        sim_time,
        time_ratio = report.time_ratio,
        "finished sphere stack run"
    );
    Ok(report)
}

/// Build the five-sphere stack for `config` and [`measure`] it.
///
/// # Errors
///
/// See [`measure`] and [`SphereStackWorld::sphere_stack`].
pub fn inertia_ratio_sphere_stack<R: Recorder + ?Sized>(
    config: &SphereStackConfig,
    recorder: &mut R,
) -> Result<AccuracyReport, AccuracyError> {
    config.validate()?;
    let mut world = SphereStackWorld::sphere_stack(config)?;
    measure(&mut world, config, recorder)
}
