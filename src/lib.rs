pub mod config;
pub mod error;
pub mod routes;
pub mod slack;
pub mod store;
pub mod telemetry;

use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub async fn run(config: config::Config) -> anyhow::Result<()> {
    telemetry::init_tracing(&config.rust_log);

    let store = store::RedisStore::connect(&config.redis_url).await?;
    let slack = slack::api::HttpSlackApi::new(
        &config.slack_api_base,
        &config.slack_client_id,
        &config.slack_client_secret,
    )?;

    let state = routes::AppState {
        store: Arc::new(store),
        slack: Arc::new(slack),
        signing_secret: config.slack_signing_secret.clone(),
    };

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
