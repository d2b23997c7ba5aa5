//! Unified error type for the channel-server persistence layer.
//!
//! Store failures keep the original driver error as their source so callers
//! can downcast it. A missing account or creature is never an error; lookups
//! return `Ok(None)` for that.

/// Unified error type covering all failure modes of the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A database operation failed (connectivity, constraint, column mapping).
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Configuration or input data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }

    /// True if this is a store failure rather than a local one.
    pub fn is_database(&self) -> bool {
        matches!(self, Error::Database { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
