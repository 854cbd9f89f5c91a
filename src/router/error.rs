//! Error types for route registration.

use thiserror::Error;

/// Errors that can occur while registering routes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two routes declare different parameter names at the same position.
    #[error("Conflicting parameter name: \":{existing}\" is already registered at this position, cannot register \":{requested}\"")]
    ConflictingParamName {
        /// The parameter name already recorded at the position.
        existing: String,
        /// The parameter name the rejected registration asked for.
        requested: String,
    },
}
