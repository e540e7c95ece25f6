pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::{generation::GenerationController, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::EntityRepository;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with every route and layer
pub fn build_router(
    entity_repo: Arc<dyn EntityRepository>,
    generation_controller: Arc<GenerationController>,
) -> Router {
    let generation_routes = Router::new()
        .route(
            "/api/generation/runs",
            post(GenerationController::start_run).delete(GenerationController::abandon),
        )
        .route("/api/generation/pause", post(GenerationController::pause))
        .route("/api/generation/resume", post(GenerationController::resume))
        .route("/api/generation/progress", get(GenerationController::progress))
        .route(
            "/api/generation/single",
            post(GenerationController::generate_single),
        )
        .with_state(generation_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(entity_repo)
        .merge(generation_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    entity_repo: Arc<dyn EntityRepository>,
    generation_controller: Arc<GenerationController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(entity_repo, generation_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
