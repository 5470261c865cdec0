use physics::PhysicsError;
use stats::StatsError;
use thiserror::Error;

use crate::probe::{Quantity, WorldError};

#[derive(Error, Debug)]
pub enum AccuracyError {
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error("simulated world failed: {0}")]
    World(#[source] WorldError),
    #[error("{quantity:?} was sampled as a {found}, expected a {expected}")]
    SampleShape {
        quantity: Quantity,
        expected: &'static str,
        found: &'static str,
    },
    #[error("simulated {actual}s instead of {expected}s (allowed drift {tolerance}s)")]
    SimDurationDrift {
        expected: f64,
        actual: f64,
        tolerance: f64,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
