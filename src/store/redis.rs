use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};

use super::{CredentialStore, StoreError, WorkspaceCredential};

const CREDENTIAL_KEY_PREFIX: &str = "slack:team:";

/// Redis-backed credential store. Values are flat JSON records addressed by
/// workspace id as the sole key.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("Connected to Redis credential store");
        Ok(Self { conn })
    }

    fn credential_key(workspace_id: &str) -> String {
        format!("{CREDENTIAL_KEY_PREFIX}{workspace_id}")
    }

    async fn set_credential(&self, credential: &WorkspaceCredential) -> Result<(), StoreError> {
        let value = serde_json::to_string(credential)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(Self::credential_key(&credential.workspace_id), value)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for RedisStore {
    async fn put(
        &self,
        workspace_id: &str,
        app_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<WorkspaceCredential, StoreError> {
        let credential = WorkspaceCredential {
            workspace_id: workspace_id.to_string(),
            app_id: app_id.to_string(),
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        self.set_credential(&credential).await?;
        Ok(credential)
    }

    async fn get(&self, workspace_id: &str) -> Result<WorkspaceCredential, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(Self::credential_key(workspace_id)).await?;
        let value = value.ok_or_else(|| StoreError::NotFound(workspace_id.to_string()))?;
        Ok(serde_json::from_str(&value)?)
    }

    async fn update_tokens(
        &self,
        workspace_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<WorkspaceCredential, StoreError> {
        let mut credential = self.get(workspace_id).await?;
        credential.access_token = access_token.to_string();
        credential.refresh_token = refresh_token.to_string();
        self.set_credential(&credential).await?;
        Ok(credential)
    }
}
