//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Failures raised inside `PostService` before they are folded into an envelope.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Blog post with ID {0} not found")]
    NotFound(i32),

    #[error("Error {action}: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: RepoError,
    },
}

impl ServiceError {
    pub(crate) fn storage(action: &'static str) -> impl FnOnce(RepoError) -> Self {
        move |source| Self::Storage { action, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
