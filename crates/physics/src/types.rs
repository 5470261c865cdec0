//! # Physics Types
//!
//! Rigid bodies, simulation parameters, and solver diagnostics.

use std::fmt;
use std::str::FromStr;

use glam::{DMat3, DQuat, DVec3};

use crate::error::PhysicsError;

/// Principal inertia of a solid sphere, `2/5 m r^2` on every axis.
#[must_use]
pub fn solid_sphere_inertia(mass: f64, radius: f64) -> DVec3 {
    DVec3::splat(0.4 * mass * radius * radius)
}

/// A rigid sphere. Orientation maps the body frame to the world frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub name: String,
    pub pos: DVec3,
    pub orientation: DQuat,
    pub vel: DVec3,
    pub angular_vel: DVec3,
    pub radius: f64,
    pub mass: f64,
    /// Principal moments of inertia in the body frame.
    pub inertia: DVec3,
    /// External force accumulated until the next step.
    pub force: DVec3,
    /// External torque accumulated until the next step.
    pub torque: DVec3,
}

impl Sphere {
    #[must_use]
    pub fn new(name: impl Into<String>, pos: DVec3, radius: f64, mass: f64) -> Self {
        Self {
            name: name.into(),
            pos,
            orientation: DQuat::IDENTITY,
            vel: DVec3::ZERO,
            angular_vel: DVec3::ZERO,
            radius,
            mass,
            inertia: solid_sphere_inertia(mass, radius),
            force: DVec3::ZERO,
            torque: DVec3::ZERO,
        }
    }

    #[inline]
    #[must_use]
    pub fn inv_mass(&self) -> f64 {
        1.0 / self.mass
    }

    /// Inertia tensor in the world frame, `R diag(I) R^T`.
    #[must_use]
    pub fn world_inertia(&self) -> DMat3 {
        let rotation = DMat3::from_quat(self.orientation);
        rotation * DMat3::from_diagonal(self.inertia) * rotation.transpose()
    }

    #[must_use]
    pub fn angular_momentum(&self) -> DVec3 {
        self.world_inertia() * self.angular_vel
    }

    /// Translational plus rotational kinetic energy.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
            + 0.5 * self.angular_vel.dot(self.angular_momentum())
    }

    /// Kinetic plus gravitational potential energy, `-m g . p`.
    #[must_use]
    pub fn energy(&self, gravity: DVec3) -> f64 {
        self.kinetic_energy() - self.mass * gravity.dot(self.pos)
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        let extent = DVec3::splat(self.radius);
        BoundingBox {
            min: self.pos - extent,
            max: self.pos + extent,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    #[must_use]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Contact solver selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SolverKind {
    /// Projected iterative impulses; reports [`SolverDiagnostics`].
    #[default]
    Sequential,
    /// One impulse pass per contact with positional correction; no diagnostics.
    Direct,
}

impl SolverKind {
    pub const ALL: [SolverKind; 2] = [SolverKind::Sequential, SolverKind::Direct];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SolverKind::Sequential => "sequential",
            SolverKind::Direct => "direct",
        }
    }
}

impl FromStr for SolverKind {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PhysicsError::UnknownSolver(s.to_string()))
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contact solver parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverParams {
    pub kind: SolverKind,
    /// Maximum sweeps over all contacts (sequential solver).
    pub iterations: u32,
    /// Stop sweeping once the RMS impulse change falls to this value.
    pub tolerance: f64,
    /// Coefficient of restitution applied to approaching contacts.
    pub restitution: f64,
    /// Fraction of penetration removed per step (error reduction parameter).
    pub erp: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            kind: SolverKind::Sequential,
            iterations: 50,
            tolerance: 0.0,
            restitution: 0.0,
            erp: 0.2,
        }
    }
}

/// Global simulation parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysParams {
    pub gravity: DVec3,
    pub dt: f64,
    pub solver: SolverParams,
}

impl Default for PhysParams {
    fn default() -> Self {
        Self {
            gravity: DVec3::new(0.0, 0.0, -9.81),
            dt: 0.001,
            solver: SolverParams::default(),
        }
    }
}

/// Per-row-class constraint error for one solve.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ConstraintErrors {
    pub normal: f64,
    pub friction: f64,
    /// `sqrt(normal^2 + friction^2)`
    pub total: f64,
}

impl ConstraintErrors {
    #[must_use]
    pub fn new(normal: f64, friction: f64) -> Self {
        Self {
            normal,
            friction,
            total: normal.hypot(friction),
        }
    }
}

/// Diagnostics of the last sequential contact solve.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SolverDiagnostics {
    /// RMS of the impulse change in the final sweep.
    pub rms_error: ConstraintErrors,
    /// RMS violation of the contact complementarity conditions after solving.
    pub constraint_residual: ConstraintErrors,
    pub iterations: u32,
    pub contacts: usize,
}
