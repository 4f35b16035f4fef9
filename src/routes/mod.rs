use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;

use crate::slack::api::SlackApi;
use crate::slack::routes::{events, install, interactive};
use crate::store::CredentialStore;

/// Shared state for all request handlers. Collaborators sit behind trait
/// objects so tests can drive the router with in-process fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub slack: Arc<dyn SlackApi>,
    pub signing_secret: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/slack/install", get(install))
        .route("/slack/events", post(events))
        .route("/slack/interactive", post(interactive))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
