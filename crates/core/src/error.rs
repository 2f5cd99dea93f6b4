//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of a write-path operation: a stock movement, a configuration edit,
/// a subscription change or the parsing of a wire value.
///
/// Read-path derivations (filtering, sorting, metrics) never produce one;
/// malformed records there are treated as empty values instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before anything changed (non-positive amount, unknown
    /// status spelling, incomplete setup).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A command does not apply to the aggregate it was sent to.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was blank.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced inventory record does not exist.
    #[error("not found")]
    NotFound,

    /// The requested change clashes with current state (trial already used).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `value` is not an accepted spelling of `kind`.
    pub fn unknown(kind: &str, value: &str) -> Self {
        Self::Validation(format!("unknown {kind}: {value}"))
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
