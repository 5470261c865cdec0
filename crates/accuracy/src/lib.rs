#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]
//! # Sphere-Stack Accuracy Driver
//!
//! Measures how well a rigid-body engine conserves momentum and energy on a
//! stack of five spheres, streaming the per-step errors into
//! [`stats`] accumulators and recording the summaries by name.
//!
//! The engine is reached only through [`TrackedWorld`], so the same
//! [`measure`] loop runs against [`SphereStackWorld`] or any other world that
//! can report a body's pose, velocities, momentum and energy.
//!
//! ```rust
//! use accuracy::{inertia_ratio_sphere_stack, RunRecord, SphereStackConfig};
//!
//! let config = SphereStackConfig { duration: 0.1, ..SphereStackConfig::default() };
//! let mut record = RunRecord::new();
//! let report = inertia_ratio_sphere_stack(&config, &mut record)?;
//! assert_eq!(report.energy.count(), config.steps());
//! assert!(record.get("energyError").is_some());
//! # Ok::<(), accuracy::AccuracyError>(())
//! ```

pub mod error;
pub mod probe;
pub mod recorder;
pub mod scenario;
pub mod world;

pub use error::AccuracyError;
pub use probe::{
    DiagnosticSample, Quantity, Sample, SampleSource, SolverSettings, TrackedWorld, WorldError,
};
pub use recorder::{Record, Recorder, RunRecord};
pub use scenario::{inertia_ratio_sphere_stack, measure, AccuracyReport, SphereStackConfig};
pub use world::SphereStackWorld;
