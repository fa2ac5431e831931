//! Assembly-time error types.
//!
//! Everything here is raised before the simulation loop starts; the
//! external solver's runtime behavior is never wrapped or retried.

use thiserror::Error;

use crate::math::FloatNum;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: FloatNum },

    #[error("{what} must be a finite coordinate")]
    NonFinite { what: &'static str },

    #[error("{what} endpoints coincide, segment has zero length")]
    DegenerateSegment { what: &'static str },

    #[error("damping factor must be in (0, 1], got {0}")]
    InvalidDamping(FloatNum),

    #[error("solver needs at least one iteration")]
    ZeroSolverIterations,

    #[error("mechanism `{0}` referenced before it was built")]
    UnknownMechanism(String),

    #[error("mechanism name `{0}` already taken")]
    DuplicateName(String),

    #[error("mechanism `{0}` has no tip to attach a rope to")]
    NoAttachableTip(String),

    #[error("mechanism `{0}` is not dynamic, a groove cannot constrain it")]
    GrooveOnStaticBody(String),

    #[error("rope `{0}` is empty, nothing to attach")]
    EmptyRope(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn ensure_positive(what: &'static str, value: FloatNum) -> Result<FloatNum> {
    if !value.is_finite() || value <= 0. {
        return Err(Error::NonPositive { what, value });
    }
    Ok(value)
}
