// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use axum::http::HeaderName;
use server::background::spawn_confirmation_sweeper;
use server::config::Config;
use server::routes;
use server::state::AppState;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting up the server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:?}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Using backend at {}", config.backend_url);

    let state = AppState::connect(&config)?;

    // A failed initial load leaves the board in its failed state; the
    // client triggers a refresh explicitly.
    state.load_all().await;

    spawn_confirmation_sweeper(state.confirmations.clone(), config.sweep_interval);
    state.forward_changes();

    let app_routes = routes::create_router(state);

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_origin(Any);

    let app = app_routes.layer(cors); // Apply the CORS layer

    tracing::info!("The server listens on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
