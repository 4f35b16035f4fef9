use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::slack::api::SlackError;
use crate::store::StoreError;

/// Application-specific errors with HTTP status code mappings
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Slack signature missing")]
    SignatureMissing,

    #[error("Slack signature invalid: {0}")]
    SignatureInvalid(String),

    #[error("Slack signature expired: {0}")]
    SignatureExpired(String),

    #[error("workspace '{0}' not found")]
    WorkspaceNotFound(String),

    #[error("Slack API error: {0}")]
    SlackApi(#[from] SlackError),

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::SignatureMissing => {
                tracing::warn!("Slack signature headers missing");
                (
                    StatusCode::UNAUTHORIZED,
                    "missing signature headers".to_string(),
                    None,
                )
            }
            AppError::SignatureInvalid(msg) => {
                tracing::warn!("Invalid Slack signature: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    "invalid signature".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::SignatureExpired(msg) => {
                tracing::warn!("Slack signature expired: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    "signature expired".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::WorkspaceNotFound(workspace_id) => {
                tracing::warn!(workspace_id = %workspace_id, "Workspace not found");
                (
                    StatusCode::NOT_FOUND,
                    format!("workspace '{}' not found", workspace_id),
                    None,
                )
            }
            AppError::SlackApi(err) => {
                tracing::error!("Slack API error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Slack API error".to_string(),
                    Some(err.to_string()),
                )
            }
            AppError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage error".to_string(),
                    Some(err.to_string()),
                )
            }
            AppError::TokenRefresh(msg) => {
                tracing::error!("Token refresh failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to refresh workspace tokens".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        let body = match detail {
            Some(detail) => json!({ "message": message, "error": detail }),
            None => json!({ "message": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(workspace_id) => AppError::WorkspaceNotFound(workspace_id),
            other => AppError::Storage(other),
        }
    }
}
