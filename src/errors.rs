//! Submodule defining the errors used across the crate.

/// Errors that can abort a benchmark run.
///
/// None of these are retried: every variant propagates up to the binary,
/// which logs it and exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store rejected a connection, schema, statement or commit.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A filesystem operation failed (store removal, directory creation, profile output).
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The record generator could not produce a usable dataset.
    #[error("record generation failed: {0}")]
    Generation(String),
    /// Verification looked up a key that is not in the store.
    #[error("no row found for user {key:?}")]
    MissingRecord {
        /// The key that was looked up.
        key: String,
    },
    /// A statement referenced a column index the table does not have.
    #[error("Column index {0} out of bounds for table with {1} columns")]
    ColumnIndexOutOfBounds(usize, usize),
    /// The CPU profiler could not be started or its report could not be built.
    #[error("cpu profiler: {0}")]
    Profiler(String),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
