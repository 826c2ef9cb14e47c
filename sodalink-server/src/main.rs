mod config;
mod routes;

use crate::config::ServerConfig;
use sodalink_core::SodaExtractor;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run(ServerConfig::default()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = Arc::new(SodaExtractor::new()?);
    let app = routes::router(extractor);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Soda link parse service listening on http://{}", listener.local_addr()?);
    info!("API endpoint: POST /api/parse-soda-link");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
