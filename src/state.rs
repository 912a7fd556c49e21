//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: la flota en memoria, el cliente de mapas
//! y el servicio de autocompletado.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::maps_client::MapsApi;
use crate::config::environment::EnvironmentConfig;
use crate::models::{Route, RouteRequest, Vehicle};
use crate::services::place_autocomplete_service::PlaceAutocompleteService;
use crate::utils::errors::{not_found_error, AppResult};

/// Dueño único de la lista de vehículos y del historial de solicitudes
#[derive(Debug, Default)]
pub struct FleetState {
    vehicles: Vec<Vehicle>,
    requests: VecDeque<RouteRequest>,
    next_vehicle_seq: usize,
}

impl FleetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear un vehículo "vehicle-N"
    pub fn add_vehicle(&mut self, name: Option<String>) -> Vehicle {
        self.next_vehicle_seq += 1;
        let vehicle = Vehicle::numbered(self.next_vehicle_seq, name);
        self.vehicles.push(vehicle.clone());
        vehicle
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Asignar la ruta al vehículo; la última escritura gana
    pub fn update_vehicle(&mut self, id: &str, route: Route, origin: String) -> AppResult<&Vehicle> {
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        vehicle.assign_route(route, origin);
        Ok(vehicle)
    }

    /// Agregar una solicitud al inicio del historial (más reciente primero)
    pub fn add_request(&mut self, request: RouteRequest) {
        self.requests.push_front(request);
    }

    pub fn requests(&self) -> impl Iterator<Item = &RouteRequest> {
        self.requests.iter()
    }
}

/// Flota compartida entre handlers
#[derive(Clone, Default)]
pub struct FleetStore {
    inner: Arc<RwLock<FleetState>>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, FleetState> {
        self.inner.read().await
    }

    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, FleetState> {
        self.inner.write().await
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub maps: Arc<dyn MapsApi>,
    pub fleet: FleetStore,
    pub autocomplete: Arc<PlaceAutocompleteService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, maps: Arc<dyn MapsApi>) -> Self {
        let autocomplete = Arc::new(PlaceAutocompleteService::new(
            maps.clone(),
            config.autocomplete.clone(),
        ));

        Self {
            config,
            maps,
            fleet: FleetStore::new(),
            autocomplete,
        }
    }
}
