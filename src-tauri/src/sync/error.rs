use crate::repository::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("WebDAV is not configured")]
    NotConfigured,

    #[error("Authentication failed, check the account and app password")]
    AuthFailed,

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Invalid HTTP method: {0}")]
    Method(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid remote data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] RepoError),
}

pub type SyncResult<T> = Result<T, SyncError>;
