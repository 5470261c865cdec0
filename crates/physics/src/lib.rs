#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Sphere World Physics
//!
//! A minimal CPU rigid-body engine for spheres, used as the system under test
//! by the accuracy benchmarks in the `accuracy` crate.
//!
//! ## Key Components
//!
//! -   **Rigid Bodies:** [`Sphere`] carries pose, linear and angular velocity,
//!     mass, and principal inertia. Defined in the [`types`] module.
//! -   **Simulation:** [`PhysicsSim`] in the [`simulation`] module owns the
//!     bodies and steps them: integration ([`integrator`]), contact detection
//!     ([`collision`]), then contact solving ([`solver`]).
//! -   **Solvers:** [`SolverKind::Sequential`] iterates impulses and reports
//!     [`SolverDiagnostics`]; [`SolverKind::Direct`] is a single pass and
//!     reports nothing.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use physics::PhysicsSim;
//!
//! let mut sim = PhysicsSim::sphere_stack(5, 0.5);
//! sim.params.gravity = DVec3::new(0.0, 0.0, -1.0);
//! let top = sim.body_index("sphere_5")?;
//! sim.add_force(top, DVec3::new(0.0, 0.0, 1.0))?;
//! sim.run(100)?;
//! # Ok::<(), physics::PhysicsError>(())
//! ```

pub mod builder;
pub mod collision;
pub mod error;
pub mod integrator;
pub mod simulation;
pub mod solver;
pub mod types;

pub use collision::Contact;
pub use error::PhysicsError;
pub use simulation::PhysicsSim;
pub use types::{
    solid_sphere_inertia, BoundingBox, ConstraintErrors, PhysParams, SolverDiagnostics,
    SolverKind, SolverParams, Sphere,
};
