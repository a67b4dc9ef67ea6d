//! The opaque connection handle the query executor runs against.
use crate::record_set::RecordSet;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use self::sqlite::SqliteMetadataSource;

/// Errors reported by a [`MetadataSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A uniqueness or other integrity constraint was violated.
    #[error("constraint violation: {message}")]
    Constraint { message: String },

    /// Any other driver-level failure.
    #[error("{message}")]
    Execution { message: String },
}

/// Contract between the query executor and a concrete database driver.
///
/// The executor never assumes a specific driver: it hands over fully rendered
/// SQL text and reads back a [`RecordSet`]. The source is non-owning from the
/// executor's point of view and must outlive it; two executors must not share
/// a source concurrently.
pub trait MetadataSource {
    fn begin(&mut self) -> Result<(), SourceError>;

    fn commit(&mut self) -> Result<(), SourceError>;

    fn rollback(&mut self) -> Result<(), SourceError>;

    /// Executes one SQL statement and returns its rows, stringified, with
    /// `NULL` cells carried as [`crate::record_set::NULL_VALUE`]. Statements
    /// that produce no rows return an empty record set.
    fn execute(&mut self, sql: &str) -> Result<RecordSet, SourceError>;

    /// Escapes `value` for embedding between single quotes in this source's
    /// dialect. The quotes themselves are the caller's concern.
    fn escape_string(&self, value: &str) -> String;

    /// The id generated by the most recent successful insert.
    fn last_insert_id(&mut self) -> Result<i64, SourceError>;

    fn is_connected(&self) -> bool;

    fn in_transaction(&self) -> bool;
}
