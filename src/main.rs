use settlement_gateway::config::AppConfig;
use settlement_gateway::core_banking::simulated::SimulatedCoreBanking;
use settlement_gateway::http::router::build_router;
use settlement_gateway::webhooks::http::HttpWebhookTransport;
use settlement_gateway::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let transport = Arc::new(HttpWebhookTransport::new(reqwest::Client::new()));
    let state = AppState::new(&cfg, transport, Arc::new(SimulatedCoreBanking));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
