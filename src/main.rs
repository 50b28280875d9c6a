use config::{logger::initialize_logger, settings::AppConfig, startup::AppState};
use tracing::info;

mod app;
mod config;
mod controllers;
mod dtos;
mod error;
mod models;
mod page;
mod repositories;
mod routes;
mod templates;
mod utils;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    initialize_logger()?;

    info!("🚀 Server starting initialization...");

    let config = AppConfig::from_env()?;
    let bind_address = config.bind_address;
    info!(api = %config.api_base_url, "polls api configured");

    // Initialize App State
    let app_state = AppState::new(config);
    let app = app::create_app(app_state);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("🚀 Server started successfully at {}", bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
