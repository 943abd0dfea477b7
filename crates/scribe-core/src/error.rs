//! Domain-level error types.

use thiserror::Error;

/// Domain errors - the failures a post operation can report to its caller.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request could not be parsed into the expected shape.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Requester is not allowed to modify this {0}")]
    Forbidden(&'static str),

    /// Any other store failure, not classified further.
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl DomainError {
    pub fn post_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "post",
            id: id.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// A unique index rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "post",
                id: "unknown".to_string(),
            },
            RepoError::UniqueViolation(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) | RepoError::Constraint(msg) => {
                DomainError::Upstream(msg)
            }
        }
    }
}
