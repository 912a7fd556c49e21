use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{HistoryQuery, RouteComputation, RouteForm};
use crate::models::RouteRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/compute", post(compute_route))
        .route("/requests", get(list_requests))
}

async fn compute_route(
    State(state): State<AppState>,
    payload: Result<Json<RouteForm>, JsonRejection>,
) -> Result<Json<RouteComputation>, AppError> {
    let Json(form) = payload?;
    let controller = RouteController::new(state.maps.clone(), state.fleet.clone());
    let response = controller.compute(form).await?;
    Ok(Json(response))
}

async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<RouteRequest>> {
    let controller = RouteController::new(state.maps.clone(), state.fleet.clone());
    Json(controller.history(query.limit).await)
}
