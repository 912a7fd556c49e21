//! Routers de la API

pub mod place_routes;
pub mod route_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/routes", route_routes::create_route_router())
        .nest("/api/places", place_routes::create_place_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-routing",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
