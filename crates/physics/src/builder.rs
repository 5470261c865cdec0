//! # Physics Simulation Builder
//!
//! Builder functions for populating a [`PhysicsSim`] with spheres and
//! adjusting their mass properties after creation.

use glam::DVec3;

use crate::error::PhysicsError;
use crate::types::Sphere;
use crate::PhysicsSim;

fn check_mass(mass: f64) -> Result<(), PhysicsError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

/// Builder methods for adding rigid bodies to the simulation
impl PhysicsSim {
    /// Add a solid sphere at rest and return its index.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::InvalidMass`] unless `mass` is positive and finite.
    pub fn add_sphere(
        &mut self,
        name: impl Into<String>,
        pos: DVec3,
        radius: f64,
        mass: f64,
    ) -> Result<usize, PhysicsError> {
        check_mass(mass)?;
        self.spheres.push(Sphere::new(name, pos, radius, mass));
        Ok(self.spheres.len() - 1)
    }

    /// A column of `count` unit-mass spheres named `sphere_1` (bottom) to
    /// `sphere_{count}` (top), stacked along +z so that neighbours just touch.
    /// There is no ground plane.
    #[must_use]
    pub fn sphere_stack(count: usize, radius: f64) -> Self {
        let mut sim = Self::new();
        for i in 0..count {
            let z = radius * (2 * i + 1) as f64;
            sim.spheres.push(Sphere::new(
                format!("sphere_{}", i + 1),
                DVec3::new(0.0, 0.0, z),
                radius,
                1.0,
            ));
        }
        tracing::debug!(count, radius, "built sphere stack");
        sim
    }

    /// Index of the first body called `name`.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::UnknownBody`] when no body has that name.
    pub fn body_index(&self, name: &str) -> Result<usize, PhysicsError> {
        self.spheres
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| PhysicsError::UnknownBody(name.to_string()))
    }

    /// # Errors
    ///
    /// [`PhysicsError::BodyIndexOutOfRange`]
    pub fn sphere(&self, index: usize) -> Result<&Sphere, PhysicsError> {
        self.spheres
            .get(index)
            .ok_or(PhysicsError::BodyIndexOutOfRange(index))
    }

    /// # Errors
    ///
    /// [`PhysicsError::BodyIndexOutOfRange`]
    pub fn sphere_mut(&mut self, index: usize) -> Result<&mut Sphere, PhysicsError> {
        self.spheres
            .get_mut(index)
            .ok_or(PhysicsError::BodyIndexOutOfRange(index))
    }

    /// Change a body's mass. Its inertia is left as is.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::InvalidMass`] or [`PhysicsError::BodyIndexOutOfRange`].
    pub fn set_mass(&mut self, index: usize, mass: f64) -> Result<(), PhysicsError> {
        check_mass(mass)?;
        self.sphere_mut(index)?.mass = mass;
        Ok(())
    }

    /// Set the principal moments of inertia (body frame).
    ///
    /// # Errors
    ///
    /// [`PhysicsError::InvalidInertia`] unless every moment is positive and
    /// finite, or [`PhysicsError::BodyIndexOutOfRange`].
    pub fn set_inertia(&mut self, index: usize, inertia: DVec3) -> Result<(), PhysicsError> {
        if !(inertia.is_finite() && inertia.min_element() > 0.0) {
            return Err(PhysicsError::InvalidInertia(inertia.to_array()));
        }
        self.sphere_mut(index)?.inertia = inertia;
        Ok(())
    }
}
