use serde::Deserialize;
use validator::Validate;

// Request para crear un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
