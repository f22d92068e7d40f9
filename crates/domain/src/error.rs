//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GridMinerError`] via `#[from]` (or an explicit `From` impl for adapter
//! errors that get boxed).

/// Top-level error shared by every port of the application.
#[derive(Debug, thiserror::Error)]
pub enum GridMinerError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced entity (or service) does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A sensor reading could not be interpreted.
    #[error("invalid reading")]
    Reading(#[from] ReadingError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A service call to a device control failed.
    #[error("service call failed")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A collaborator has shut down and can no longer serve requests.
    #[error("{0} is no longer available")]
    Unavailable(&'static str),
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// An entity id is not of the `<domain>.<object_id>` form.
    #[error("invalid entity id {0:?}")]
    InvalidEntityId(String),

    /// A threshold is NaN or infinite.
    #[error("threshold {name} must be finite")]
    NonFiniteThreshold { name: &'static str },

    /// The low threshold sits above the high threshold.
    #[error("low threshold {low} is greater than high threshold {high}")]
    InvertedThresholds { low: f64, high: f64 },

    /// A service call carried no usable `value` field.
    #[error("service call is missing a numeric value")]
    MissingValue,

    /// A requested value falls outside the accepted range.
    #[error("value {value} is outside [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// Lookup failure for a named thing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A state value that is neither a known sentinel nor a usable number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadingError {
    #[error("state {0:?} is not numeric")]
    NotNumeric(String),

    #[error("state {0:?} is not a finite number")]
    NotFinite(String),
}
