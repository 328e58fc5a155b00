/*
 * Swapscope - DEX route comparison service
 * Main entry point for the application
 */

use std::sync::Arc;
use swapscope::{api, config::Config, service::SwapService};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    init_tracing(&config.server.log_level);

    info!("Starting Swapscope");

    let swap_service = SwapService::new(config.clone()).map_err(|e| {
        error!("Failed to initialize swap service: {}", e);
        e
    })?;

    let api_state = api::ApiState {
        config: config.clone(),
        swap_service: Arc::new(swap_service),
    };

    info!("Starting API server on {}:{}", config.server.host, config.server.port);

    let rocket = api::create_rocket(api_state);
    if let Err(e) = rocket.launch().await {
        error!("API server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("swapscope={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
