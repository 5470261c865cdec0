//! # Sampling Interface
//!
//! The narrow boundary between an accuracy run and the simulator it measures.
//! A run only ever asks a world for the current value of a named
//! [`Quantity`], for optional solver diagnostics, and to apply a force and
//! step. Anything engine-specific stays behind [`TrackedWorld`].

use glam::DVec3;

use crate::error::AccuracyError;

/// Error type of a [`TrackedWorld`] implementation.
pub type WorldError = Box<dyn std::error::Error + Send + Sync>;

/// A per-step observable of the tracked body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Centre of mass in the world frame.
    Position,
    LinearVelocity,
    AngularVelocity,
    /// World inertia times angular velocity.
    AngularMomentum,
    /// Kinetic plus potential energy.
    Energy,
}

/// One observed value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sample {
    Scalar(f64),
    Vector(DVec3),
}

impl Sample {
    fn shape(self) -> &'static str {
        match self {
            Sample::Scalar(_) => "scalar",
            Sample::Vector(_) => "vector",
        }
    }
}

/// Solver diagnostics for one step, when the engine exposes them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DiagnosticSample {
    pub rms_error: f64,
    pub constraint_residual: f64,
}

/// Step-size and solver settings applied once initial conditions are read.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverSettings {
    pub dt: f64,
    pub iterations: u32,
    pub tolerance: f64,
}

pub trait SampleSource {
    /// Simulated seconds since the world was created.
    fn sim_time(&self) -> f64;

    fn sample(&self, quantity: Quantity) -> Sample;

    /// Engines without solver diagnostics keep the default.
    fn diagnostics(&self) -> Option<DiagnosticSample> {
        None
    }
}

pub trait TrackedWorld: SampleSource {
    /// # Errors
    ///
    /// Implementation-defined.
    fn configure_solver(&mut self, settings: SolverSettings) -> Result<(), WorldError>;

    /// Add a force to the tracked body for the next step.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn apply_force(&mut self, force: DVec3) -> Result<(), WorldError>;

    /// # Errors
    ///
    /// Implementation-defined.
    fn step(&mut self) -> Result<(), WorldError>;
}

/// Sample `quantity` and require a vector.
///
/// # Errors
///
/// [`AccuracyError::SampleShape`] when the source returns a scalar.
pub fn sample_vector<S: SampleSource + ?Sized>(
    source: &S,
    quantity: Quantity,
) -> Result<DVec3, AccuracyError> {
    match source.sample(quantity) {
        Sample::Vector(v) => Ok(v),
        other => Err(AccuracyError::SampleShape {
            quantity,
            expected: "vector",
            found: other.shape(),
        }),
    }
}

/// Sample `quantity` and require a scalar.
///
/// # Errors
///
/// [`AccuracyError::SampleShape`] when the source returns a vector.
pub fn sample_scalar<S: SampleSource + ?Sized>(
    source: &S,
    quantity: Quantity,
) -> Result<f64, AccuracyError> {
    match source.sample(quantity) {
        Sample::Scalar(x) => Ok(x),
        other => Err(AccuracyError::SampleShape {
            quantity,
            expected: "scalar",
            found: other.shape(),
        }),
    }
}
