use std::sync::Arc;

use crate::clients::maps_client::MapsApi;
use crate::dto::route_dto::{RouteComputation, RouteForm};
use crate::models::RouteRequest;
use crate::services::route_workflow_service::RouteWorkflow;
use crate::state::FleetStore;
use crate::utils::errors::AppError;

/// Límite por defecto del historial devuelto
const DEFAULT_HISTORY_LIMIT: usize = 50;

pub struct RouteController {
    maps: Arc<dyn MapsApi>,
    fleet: FleetStore,
}

impl RouteController {
    pub fn new(maps: Arc<dyn MapsApi>, fleet: FleetStore) -> Self {
        Self { maps, fleet }
    }

    pub async fn compute(&self, form: RouteForm) -> Result<RouteComputation, AppError> {
        let mut workflow = RouteWorkflow::new(self.maps.clone(), self.fleet.clone());
        workflow.compute_route(form).await
    }

    /// Historial de solicitudes, más reciente primero
    pub async fn history(&self, limit: Option<usize>) -> Vec<RouteRequest> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        self.fleet
            .read()
            .await
            .requests()
            .take(limit)
            .cloned()
            .collect()
    }
}
