use crate::error::AppError;
use crate::slack::api::SlackApi;
use crate::store::{CredentialStore, WorkspaceCredential};

/// Check-then-refresh token lifecycle, run inline before dispatching any
/// inbound event.
///
/// Probes the access token against the API; when the probe reports
/// `token_expired`, exchanges the stored refresh token for a fresh pair,
/// persists it, and mutates `credential` so the current request carries on
/// with live tokens. Any other probe error is fatal for the request, and a
/// failed refresh or persistence is not retried here; the next inbound
/// event tries again.
pub async fn ensure_fresh(
    store: &dyn CredentialStore,
    slack: &dyn SlackApi,
    credential: &mut WorkspaceCredential,
) -> Result<(), AppError> {
    match slack.probe_auth(&credential.access_token).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_token_expired() => {
            tracing::info!(
                workspace_id = %credential.workspace_id,
                "Access token expired, refreshing"
            );

            let pair = slack
                .refresh_tokens(&credential.refresh_token)
                .await
                .map_err(|e| AppError::TokenRefresh(format!("refresh exchange failed: {e}")))?;

            let updated = store
                .update_tokens(&credential.workspace_id, &pair.access_token, &pair.refresh_token)
                .await
                .map_err(|e| {
                    AppError::TokenRefresh(format!("failed to persist refreshed tokens: {e}"))
                })?;

            credential.access_token = updated.access_token;
            credential.refresh_token = updated.refresh_token;

            tracing::info!(
                workspace_id = %credential.workspace_id,
                "Refreshed and stored workspace tokens"
            );
            Ok(())
        }
        Err(err) => Err(AppError::SlackApi(err)),
    }
}
