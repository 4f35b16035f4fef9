use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::slack::views::{HomeTabView, ModalView};

/// Slack's machine-readable error code for an expired access token.
const TOKEN_EXPIRED_CODE: &str = "token_expired";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SlackError {
    /// The API answered with `ok: false`; `code` is Slack's `error` field.
    #[error("slack api error: {code}")]
    Api { code: String },

    #[error("slack transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SlackError {
    /// Whether this failure means the access token needs a refresh, as
    /// opposed to any other API or transport problem.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, SlackError::Api { code } if code == TOKEN_EXPIRED_CODE)
    }
}

/// Result of exchanging an authorization code for workspace tokens.
#[derive(Debug, Clone)]
pub struct OauthAccess {
    pub workspace_id: String,
    pub app_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Rotated token pair from a refresh exchange.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Outbound Slack Web API surface used by the bot.
///
/// A trait so the dispatchers can be exercised against a recording fake;
/// `HttpSlackApi` is the real implementation.
#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<OauthAccess, SlackError>;

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, SlackError>;

    /// Lightweight liveness probe for an access token.
    async fn probe_auth(&self, access_token: &str) -> Result<(), SlackError>;

    async fn post_message(
        &self,
        access_token: &str,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<(), SlackError>;

    async fn publish_home_view(
        &self,
        access_token: &str,
        user_id: &str,
        view: &HomeTabView,
    ) -> Result<(), SlackError>;

    async fn open_view(
        &self,
        access_token: &str,
        trigger_id: &str,
        view: &ModalView,
    ) -> Result<(), SlackError>;

    async fn update_view(
        &self,
        access_token: &str,
        view_id: &str,
        view: &ModalView,
    ) -> Result<(), SlackError>;
}

/// Minimal `ok`/`error` envelope every Web API response carries.
#[derive(Debug, Deserialize)]
struct ApiStatus {
    ok: bool,
    error: Option<String>,
}

impl ApiStatus {
    fn into_result(self) -> Result<(), SlackError> {
        if self.ok {
            Ok(())
        } else {
            Err(SlackError::Api {
                code: self.error.unwrap_or_else(|| "unknown_error".to_string()),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct OauthAccessResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    app_id: String,
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    team: Option<TeamField>,
}

#[derive(Debug, Deserialize)]
struct TeamField {
    id: String,
}

pub struct HttpSlackApi {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl HttpSlackApi {
    pub fn new(base_url: &str, client_id: &str, client_secret: &str) -> Result<Self, SlackError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// POST a JSON body to a Web API method and check the `ok` envelope.
    async fn call(
        &self,
        method: &str,
        access_token: &str,
        body: serde_json::Value,
    ) -> Result<(), SlackError> {
        let status: ApiStatus = self
            .http
            .post(self.url(method))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        status.into_result()
    }

    async fn oauth_access(&self, params: &[(&str, &str)]) -> Result<OauthAccessResponse, SlackError> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        form.extend_from_slice(params);

        let response: OauthAccessResponse = self
            .http
            .post(self.url("oauth.v2.access"))
            .form(&form)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(SlackError::Api {
                code: response
                    .error
                    .unwrap_or_else(|| "unknown_error".to_string()),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SlackApi for HttpSlackApi {
    async fn exchange_code(&self, code: &str) -> Result<OauthAccess, SlackError> {
        let response = self.oauth_access(&[("code", code)]).await?;

        Ok(OauthAccess {
            workspace_id: response.team.map(|t| t.id).unwrap_or_default(),
            app_id: response.app_id,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        })
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, SlackError> {
        let response = self
            .oauth_access(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        Ok(TokenPair {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        })
    }

    async fn probe_auth(&self, access_token: &str) -> Result<(), SlackError> {
        let status: ApiStatus = self
            .http
            .get(self.url("team.info"))
            .bearer_auth(access_token)
            .send()
            .await?
            .json()
            .await?;
        status.into_result()
    }

    async fn post_message(
        &self,
        access_token: &str,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<(), SlackError> {
        let mut body = json!({ "channel": channel, "text": text });
        if let Some(thread_ts) = thread_ts {
            body["thread_ts"] = json!(thread_ts);
        }
        self.call("chat.postMessage", access_token, body).await
    }

    async fn publish_home_view(
        &self,
        access_token: &str,
        user_id: &str,
        view: &HomeTabView,
    ) -> Result<(), SlackError> {
        self.call(
            "views.publish",
            access_token,
            json!({ "user_id": user_id, "view": view }),
        )
        .await
    }

    async fn open_view(
        &self,
        access_token: &str,
        trigger_id: &str,
        view: &ModalView,
    ) -> Result<(), SlackError> {
        self.call(
            "views.open",
            access_token,
            json!({ "trigger_id": trigger_id, "view": view }),
        )
        .await
    }

    async fn update_view(
        &self,
        access_token: &str,
        view_id: &str,
        view: &ModalView,
    ) -> Result<(), SlackError> {
        self.call(
            "views.update",
            access_token,
            json!({ "view_id": view_id, "view": view }),
        )
        .await
    }
}
