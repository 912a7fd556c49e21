use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::Vehicle;
use crate::state::FleetStore;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    fleet: FleetStore,
}

impl VehicleController {
    pub fn new(fleet: FleetStore) -> Self {
        Self { fleet }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let vehicle = self.fleet.write().await.add_vehicle(name);

        log::info!("🚗 Vehículo creado: {} ({})", vehicle.name, vehicle.id);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Vehicle, AppError> {
        self.fleet
            .read()
            .await
            .vehicle(id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn list(&self) -> Vec<Vehicle> {
        self.fleet.read().await.vehicles().to_vec()
    }
}
