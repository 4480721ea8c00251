//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;

/// Domain errors - what the post service reports to its callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: PostId },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl DomainError {
    pub(crate) fn post_not_found(id: &PostId) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id: id.clone(),
        }
    }
}

/// Store-level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed collection: {0}")]
    Malformed(String),
}

/// Submitted post fields that were empty after defaulting and trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required fields are empty: {}", .empty_fields.join(", "))]
pub struct ValidationError {
    pub empty_fields: Vec<&'static str>,
}
