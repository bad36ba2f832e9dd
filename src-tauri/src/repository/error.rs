//! Repository errors

use crate::domain::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Credential decode error: {0}")]
    Cipher(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for DomainError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Domain(inner) => inner,
            other => DomainError::Internal(other.to_string()),
        }
    }
}
