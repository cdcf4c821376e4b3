use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

/// API routes with docs, middleware and `/health` attached
fn build_app(config: &Config) -> eyre::Result<Router> {
    let api_routes = api::routes(config);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    Ok(router.merge(health_router(config.app)))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        min_user_age = config.users.min_user_age,
        environment = ?config.environment,
        "Loaded users API configuration"
    );

    let app = build_app(&config)?;

    info!("Starting users API with graceful shutdown (30s timeout)");

    create_production_app(app, &config.server, Duration::from_secs(30), async {
        info!("Shutting down: in-memory user records are discarded");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
