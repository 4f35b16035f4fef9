use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    pub slack_client_id: String,
    pub slack_client_secret: String,

    /// When unset, webhook signature verification is skipped.
    pub slack_signing_secret: Option<String>,

    #[serde(default = "default_slack_api_base")]
    pub slack_api_base: String,

    #[serde(default = "default_rust_log")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_slack_api_base() -> String {
    "https://slack.com/api".to_string()
}

fn default_rust_log() -> String {
    "info,homeroom=debug".to_string()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
