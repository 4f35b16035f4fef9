pub mod models;
pub mod redis;

pub use self::models::WorkspaceCredential;
pub use self::redis::RedisStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workspace '{0}' not found")]
    NotFound(String),

    #[error("redis error: {0}")]
    Backend(#[from] ::redis::RedisError),

    #[error("corrupt credential record: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Persistence contract for workspace credentials.
///
/// Every call round-trips to the backing key-value service; there is no
/// in-process cache. Concurrent writers for the same workspace are
/// last-writer-wins, which is acceptable since refreshes happen at most once
/// per expiry window.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create (or overwrite) the credential record for a workspace.
    async fn put(
        &self,
        workspace_id: &str,
        app_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<WorkspaceCredential, StoreError>;

    /// Fetch the credential record, `StoreError::NotFound` if absent.
    async fn get(&self, workspace_id: &str) -> Result<WorkspaceCredential, StoreError>;

    /// Replace both tokens of an existing record, read-modify-write.
    async fn update_tokens(
        &self,
        workspace_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<WorkspaceCredential, StoreError>;
}
