use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    // Un cuerpo vacío crea un vehículo con nombre por defecto
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateVehicleRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };
    let controller = VehicleController::new(state.fleet.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.fleet.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn list_vehicles(State(state): State<AppState>) -> Json<Vec<Vehicle>> {
    let controller = VehicleController::new(state.fleet.clone());
    Json(controller.list().await)
}
