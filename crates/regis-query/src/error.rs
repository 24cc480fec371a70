//! Query errors.

use regis_core::{RequirementId, ValidationError};
use regis_store::StoreError;
use thiserror::Error;

/// Failure of a query operation.
///
/// An empty result is not an error; neither is a dangling conflict
/// reference, which is dropped from the response and logged.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A path parameter was not a member of its enumeration.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// No requirement has the requested id. The message is served to
    /// clients as-is, so it does not carry the id.
    #[error("Requirement not found")]
    NotFound(RequirementId),

    /// The repository failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}
