//! Hello Hook webhook server

use std::sync::Arc;

use github::GitHubClient;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api=debug".parse()?)
                .add_directive("processor=debug".parse()?)
                .add_directive("github=debug".parse()?),
        )
        .init();

    info!("👋 Starting Hello Hook");

    // Load configuration
    let config = common::Config::from_env();
    if config.github_token.is_none() {
        warn!("GITHUB_ACCESS_TOKEN is not set, comments will be posted unauthenticated");
    }

    // One client for the life of the process, shared by every request
    let client = GitHubClient::from_config(&config)?;
    info!(
        "📡 Commenting via {} (timeout {:?})",
        config.github_api_url, config.github_timeout
    );

    let state = Arc::new(AppState::new(Arc::new(client)));

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
