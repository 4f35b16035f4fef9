use serde::Deserialize;

/// Top-level Events API envelope.
///
/// Slack tags the payload with a `type` discriminant:
/// - `url_verification`: endpoint liveness challenge, echoed back verbatim
/// - `event_callback`: an actual workspace event
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum EventEnvelope {
    #[serde(rename = "url_verification")]
    UrlVerification { challenge: String },

    #[serde(rename = "event_callback")]
    EventCallback {
        team_id: String,
        event: EventBody,
        #[serde(default)]
        event_id: String,
    },
}

/// The nested event object. The `kind` field routes dispatch; everything
/// else is optional because different event types fill different subsets.
#[derive(Debug, Deserialize)]
pub struct EventBody {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub channel: String,

    #[serde(default)]
    pub text: String,

    /// Set only on replies inside a thread; holds the parent message
    /// timestamp.
    #[serde(default)]
    pub thread_ts: Option<String>,

    #[serde(default)]
    pub bot_profile: Option<BotProfile>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BotProfile {
    #[serde(default)]
    pub name: String,
}

impl EventBody {
    /// Events carrying a bot profile originate from a bot, including this
    /// bot's own replies, and must never be answered.
    pub fn is_bot_originated(&self) -> bool {
        self.bot_profile.as_ref().is_some_and(|p| !p.name.is_empty())
    }
}
