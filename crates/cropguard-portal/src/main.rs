//! CropGuard Portal Binary

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cropguard_portal::{create_router, AppState, PortalConfig, PORTAL_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting CropGuard Portal v{}", PORTAL_VERSION);

    // Load configuration
    let config = PortalConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let state = AppState::from_config(&config)?;
    info!(
        crops = state.quotes.tariff().crops.len(),
        plans = state.catalog.offers().len(),
        "Quote service initialized"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down CropGuard Portal");
    Ok(())
}
