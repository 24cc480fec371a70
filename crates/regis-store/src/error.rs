//! Storage errors.
//!
//! Every variant is a failure of the storage layer itself. An empty result
//! or a missing row is never a `StoreError`: those are `Ok(vec![])` and
//! `Ok(None)` respectively.

use std::path::PathBuf;

use regis_core::ValidationError;
use thiserror::Error;

/// Errors raised by a [`Repository`](crate::Repository) or by dataset I/O.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database rejected a query or could not be reached.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations failed to apply.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The backing store is not reachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be mapped to a domain value.
    #[error("{table} row {id}: {reason}")]
    Decode {
        /// Table the row was read from.
        table: &'static str,
        /// Row id.
        id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A dataset snapshot violated an integrity rule.
    #[error("invalid dataset: {0}")]
    InvalidDataset(#[from] ValidationError),

    /// A dataset file could not be read or written.
    #[error("dataset file {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A dataset file was not valid JSON for the data model.
    #[error("dataset file {path} is malformed: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}
