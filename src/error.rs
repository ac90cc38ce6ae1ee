//! Error taxonomy for solver invocation.
//!
//! Every failure here is an input-validation error detected before a solver
//! loop starts. There are no retryable conditions: the solvers perform no
//! I/O, and exhausting an iteration budget is normal termination, not an
//! error.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller before any solver work is performed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A configuration field is outside its valid domain.
    ///
    /// Returned by the `validate()` method of each config type, which every
    /// runner calls first. Nothing is partially run.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The problem instance is degenerate or inconsistent.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidConfig`] with the given field name.
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
