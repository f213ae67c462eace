// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::weather_service::WeatherService;
use crate::domain::city::SupportedCities;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::cwa_repository::CwaRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    if config.cwa.api_key.is_none() {
        tracing::warn!("CWA_API_KEY is not set; forecast endpoints will fail until it is");
    }

    // Create repository (infrastructure layer)
    let repository = Arc::new(CwaRepository::new(
        config.cwa.base_url.clone(),
        config.cwa.api_key.clone(),
        config.cwa.dataset.clone(),
        config.cwa.timeout(),
    )?);

    // Create services (application layer)
    let weather_service = WeatherService::new(repository, SupportedCities::default());

    // Build router (presentation layer)
    let router = build_router(Arc::new(AppState { weather_service }));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting cwa-forecast-proxy on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
