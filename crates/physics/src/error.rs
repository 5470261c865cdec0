use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("simulation has no spheres")]
    NoSpheres,
    #[error("no body named `{0}`")]
    UnknownBody(String),
    #[error("body index {0} out of range")]
    BodyIndexOutOfRange(usize),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("principal inertia must be positive and finite, got {0:?}")]
    InvalidInertia([f64; 3]),
    #[error("unknown solver `{0}` (expected `sequential` or `direct`)")]
    UnknownSolver(String),
}
