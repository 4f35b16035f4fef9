use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::AppState;
use crate::slack::api::SlackApi;
use crate::slack::events::{EventBody, EventEnvelope};
use crate::slack::interactions::{self, InteractionCallback};
use crate::slack::tokens::ensure_fresh;
use crate::slack::verification::verify_if_configured;
use crate::slack::views::{
    self, ACTION_MODAL_TOPIC_SELECT, ACTION_OPEN_MODAL, ACTION_TOGGLE_TEXT, ToggleVersion,
};
use crate::store::WorkspaceCredential;

#[derive(Debug, Deserialize)]
pub struct InstallQuery {
    #[serde(default)]
    pub code: String,
}

/// OAuth installation callback.
///
/// # Endpoint
/// GET /slack/install?code=...
///
/// Exchanges the authorization code for workspace tokens, persists the
/// credential record, and redirects into the installed app's About tab.
/// The tokens belong to the whole workspace, not a single user.
pub async fn install(
    State(state): State<AppState>,
    Query(query): Query<InstallQuery>,
) -> Result<Response, AppError> {
    if query.code.is_empty() {
        return Err(AppError::BadRequest(
            "missing 'code' url parameter for app installation".to_string(),
        ));
    }

    let access = state.slack.exchange_code(&query.code).await?;

    tracing::info!(
        workspace_id = %access.workspace_id,
        app_id = %access.app_id,
        "Installed app to workspace"
    );

    state
        .store
        .put(
            &access.workspace_id,
            &access.app_id,
            &access.access_token,
            &access.refresh_token,
        )
        .await
        .map_err(AppError::Storage)?;

    let deep_link = format!(
        "slack://app?team={}&id={}&tab=about",
        access.workspace_id, access.app_id
    );
    Ok((StatusCode::FOUND, [(header::LOCATION, deep_link)]).into_response())
}

/// Events API webhook.
///
/// # Endpoint
/// POST /slack/events
///
/// Challenges are echoed back verbatim; bot-originated events are dropped
/// silently. Everything else resolves the workspace credential, refreshes
/// tokens inline if needed, then routes on the event type.
pub async fn events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    verify_if_configured(state.signing_secret.as_deref(), &headers, &body)?;

    let envelope: EventEnvelope = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid event payload: {e}")))?;

    let (team_id, event, event_id) = match envelope {
        EventEnvelope::UrlVerification { challenge } => {
            tracing::info!(challenge = %challenge, "Answering url_verification challenge");
            return Ok(challenge.into_response());
        }
        EventEnvelope::EventCallback {
            team_id,
            event,
            event_id,
        } => (team_id, event, event_id),
    };

    if event.is_bot_originated() {
        tracing::debug!(team_id = %team_id, "Got bot event, skipping");
        return Ok(StatusCode::OK.into_response());
    }

    tracing::info!(
        team_id = %team_id,
        event_id = %event_id,
        event_type = %event.kind,
        user_id = %event.user,
        "Handling event callback"
    );

    let mut credential = state.store.get(&team_id).await?;
    ensure_fresh(state.store.as_ref(), state.slack.as_ref(), &mut credential).await?;

    match event.kind.as_str() {
        "app_home_opened" => {
            publish_home(
                state.slack.as_ref(),
                &credential,
                &event.user,
                ToggleVersion::One,
            )
            .await;
        }
        "message" => reply_to_message(state.slack.as_ref(), &credential, &event).await,
        other => {
            tracing::debug!(event_type = %other, "Ignoring unhandled event type");
        }
    }

    Ok(StatusCode::OK.into_response())
}

/// Interactivity webhook.
///
/// # Endpoint
/// POST /slack/interactive (form body, `payload` field)
///
/// Each block action is dispatched independently; a failure on one action
/// is logged and does not abort the rest. Responds 200 empty once the
/// workspace is resolved.
pub async fn interactive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    verify_if_configured(state.signing_secret.as_deref(), &headers, &body)?;

    let callback = interactions::parse_payload(&body)?;
    let credential = state.store.get(&callback.team.id).await?;

    for action in &callback.actions {
        dispatch_action(state.slack.as_ref(), &credential, &callback, action).await;
    }

    Ok(StatusCode::OK)
}

async fn dispatch_action(
    slack: &dyn SlackApi,
    credential: &WorkspaceCredential,
    callback: &InteractionCallback,
    action: &interactions::BlockAction,
) {
    match action.action_id.as_str() {
        ACTION_TOGGLE_TEXT => {
            let version = ToggleVersion::from_button_value(&action.value);
            publish_home(slack, credential, &callback.user.id, version).await;
        }
        ACTION_OPEN_MODAL => {
            let view = views::topic_modal(None);
            if let Err(err) = slack
                .open_view(&credential.access_token, &callback.trigger_id, &view)
                .await
            {
                tracing::error!(
                    trigger_id = %callback.trigger_id,
                    error = %err,
                    "Failed to open modal view"
                );
            }
        }
        ACTION_MODAL_TOPIC_SELECT => {
            let topic = action.selected_option.as_ref().map(|o| o.value.as_str());
            let view_id = callback.view.as_ref().map(|v| v.id.as_str()).unwrap_or("");
            let view = views::topic_modal(topic);
            if let Err(err) = slack
                .update_view(&credential.access_token, view_id, &view)
                .await
            {
                tracing::error!(view_id = %view_id, error = %err, "Failed to update modal view");
            }
        }
        other => {
            tracing::warn!(action_id = %other, "Unhandled block action");
        }
    }
}

/// Best-effort home tab publish; the webhook response does not depend on it.
async fn publish_home(
    slack: &dyn SlackApi,
    credential: &WorkspaceCredential,
    user_id: &str,
    version: ToggleVersion,
) {
    let view = views::home_tab(version);
    if let Err(err) = slack
        .publish_home_view(&credential.access_token, user_id, &view)
        .await
    {
        tracing::error!(user_id = %user_id, error = %err, "Failed to publish home tab view");
    }
}

/// Best-effort message echo: direct reply in the channel, or a threaded
/// reply when the incoming message was itself in a thread.
async fn reply_to_message(
    slack: &dyn SlackApi,
    credential: &WorkspaceCredential,
    event: &EventBody,
) {
    let (text, thread_ts) = match event.thread_ts.as_deref() {
        None | Some("") => (format!("Got your message:\n```{}```", event.text), None),
        Some(thread_ts) => (
            format!("Got your thread message:\n```{}```", event.text),
            Some(thread_ts),
        ),
    };

    match slack
        .post_message(&credential.access_token, &event.channel, &text, thread_ts)
        .await
    {
        Ok(()) => {
            tracing::info!(channel = %event.channel, threaded = thread_ts.is_some(), "Replied to message");
        }
        Err(err) => {
            tracing::error!(channel = %event.channel, error = %err, "Failed replying to message");
        }
    }
}
