//! Errors.
use crate::source::SourceError;

/// Errors surfaced by [`crate::QueryExecutor`] operations.
///
/// Operations recover nothing internally; every error returns immediately to
/// the caller. Deleting non-existent ids is the sole exception and is plain
/// success.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// No open transaction, closed connection, or a schema newer than the
    /// library.
    #[error("failed precondition: {message}")]
    FailedPrecondition { message: String },

    /// The underlying SQL execution failed; the driver message is propagated.
    #[error("internal error: {message}")]
    Internal { message: String },

    /// A uniqueness constraint was violated on insert.
    #[error("already exists: {message}")]
    AlreadyExists { message: String },

    /// A select-by-id returned zero rows where the contract requires one.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Malformed list options, filters, or illegal values.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The stored schema is in a state that cannot be interpreted safely.
    #[error("data loss: {message}")]
    DataLoss { message: String },

    /// The operation is not supported by this executor variant.
    #[error("{operation} is not supported by this executor")]
    Unimplemented { operation: String },
}

impl From<SourceError> for QueryError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::Constraint { message } => Self::AlreadyExists { message },
            SourceError::Execution { message } => Self::Internal { message },
        }
    }
}
