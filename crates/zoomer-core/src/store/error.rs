//! Store error classification.

use super::types::RecordId;

/// Errors surfaced by store and capacity operations.
///
/// Callers on the lookup path log and degrade to "no stored zoom"; callers
/// on the write path log without retrying. `ConstraintViolation` is raised
/// before any I/O happens.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected the operation (connection, transaction, query).
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    /// An update/delete target does not exist. Surfaced to the immediate
    /// caller only.
    #[error("record {0} not found")]
    RecordNotFound(RecordId),
    /// Invalid argument rejected before touching the database.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// Record could not be serialized (size estimation, export).
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
