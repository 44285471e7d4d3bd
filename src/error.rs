//! Error types surfaced by the query pipeline.

use thiserror::Error;

/// Result alias used throughout the query surface.
pub type QueryResult<T> = Result<T, QueryError>;

/// Which request precondition a [`ValidationError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// `year` or `quarter` was not supplied.
    MissingTerm,
    /// None of the scoping filters was supplied.
    MissingScope,
}

/// A user request failed a precondition. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Every way a query can fail.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A lookup by identifier found no catalog entry.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// The schedule feed or the grade query executor failed.
    #[error("upstream failure: {0:#}")]
    Upstream(#[source] anyhow::Error),
}

impl QueryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        QueryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound { .. })
    }
}

impl From<anyhow::Error> for QueryError {
    fn from(err: anyhow::Error) -> Self {
        QueryError::Upstream(err)
    }
}
