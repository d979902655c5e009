use std::sync::Arc;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

#[cfg(test)]
mod test_support;

use axum::{Router, middleware, routing::get};
use places_service::{config::config_google_places, services::google_places_service::GooglePlacesService};
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::{AppState, CorsPolicy, ServerConfig};
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::{cors::cors_layer, request_id::request_id_layer},
    routes::search::search_route::search_route,
};

/// Loads configuration from the environment, binds the listener and serves
/// the relay until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let server = ServerConfig::from_env()?;
    let places = config_google_places()?;
    let max_results = places.max_results;
    let provider = GooglePlacesService::new(places)?;

    let state = Arc::new(AppState::new(
        Arc::new(provider),
        max_results,
        server.cors.clone(),
    ));

    let listener = tokio::net::TcpListener::bind(&server.address)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %server.address, cors = ?server.cors, "relay listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("relay stopped");
    Ok(())
}

/// Builds the relay router around the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(search_route))
        .layer(middleware::from_fn_with_state(state.clone(), cors_layer))
        .layer(middleware::from_fn(request_id_layer))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
