//! Flujo de solicitud de ruta
//!
//! Valida el formulario, hace una única llamada al servicio de direcciones,
//! decodifica la polyline y actualiza la flota en memoria.
//!
//! `Idle -> ValidatingInput -> AwaitingRouteResponse -> RouteReady`, con
//! `Error` alcanzable desde la validación o la red; tras un error el flujo
//! vuelve a `Idle` y conserva el mensaje en `last_error`.

use serde::Serialize;
use std::sync::Arc;

use crate::clients::maps_client::MapsApi;
use crate::dto::maps_dto::DirectionsRequest;
use crate::dto::route_dto::{RouteComputation, RouteForm};
use crate::models::{Bounds, PlaceSelection, Route, RouteRequest};
use crate::state::FleetStore;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::polyline;
use crate::utils::validation::{is_blank, split_waypoints};

pub const MISSING_PLACES_MESSAGE: &str =
    "Por favor selecciona una dirección de origen y destino válidas";
pub const MISSING_VEHICLE_MESSAGE: &str = "Por favor selecciona un vehículo para asignar la ruta";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkflowState {
    Idle,
    ValidatingInput,
    AwaitingRouteResponse,
    RouteReady,
    Error,
}

/// Formulario ya validado
struct ValidatedForm {
    vehicle_id: String,
    origin: String,
    destination: String,
    waypoints: Vec<String>,
    optimize: bool,
}

pub struct RouteWorkflow {
    maps: Arc<dyn MapsApi>,
    fleet: FleetStore,
    state: WorkflowState,
    last_error: Option<String>,
    route: Option<Route>,
    bounds: Option<Bounds>,
}

impl RouteWorkflow {
    pub fn new(maps: Arc<dyn MapsApi>, fleet: FleetStore) -> Self {
        Self {
            maps,
            fleet,
            state: WorkflowState::Idle,
            last_error: None,
            route: None,
            bounds: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Viewport ajustado a la última ruta calculada
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Calcular la ruta del formulario y asignarla al vehículo seleccionado
    pub async fn compute_route(&mut self, form: RouteForm) -> AppResult<RouteComputation> {
        self.last_error = None;
        self.transition(WorkflowState::ValidatingInput);

        let form = match self.validate(form).await {
            Ok(form) => form,
            Err(e) => return Err(self.fail(e)),
        };

        let request = DirectionsRequest {
            origin: form.origin.clone(),
            destination: form.destination.clone(),
            waypoints: form.waypoints.clone(),
            vehicle_id: form.vehicle_id.clone(),
            optimize: form.optimize,
        };

        self.transition(WorkflowState::AwaitingRouteResponse);
        log::info!("📋 Calculando ruta para {}: {:?}", form.vehicle_id, request);

        let response = match self.maps.directions(&request).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e.into())),
        };

        let coords = match polyline::decode(&response.polyline) {
            Ok(coords) => coords,
            Err(e) => return Err(self.fail(e.into())),
        };

        let route = Route {
            coords,
            distance_m: response.distance_m,
            duration_s: response.duration_s,
            waypoints: response.waypoints.unwrap_or_else(|| form.waypoints.clone()),
        };
        let bounds = Bounds::fit(&route.coords);

        let request = RouteRequest::completed(
            form.vehicle_id.clone(),
            form.origin.clone(),
            form.destination,
            form.waypoints,
        );

        let assigned = {
            let mut fleet = self.fleet.write().await;
            let result = fleet
                .update_vehicle(&form.vehicle_id, route.clone(), form.origin)
                .map(|_| ());
            if result.is_ok() {
                fleet.add_request(request.clone());
            }
            result
        };
        if let Err(e) = assigned {
            return Err(self.fail(e));
        }

        log::info!(
            "✅ Ruta asignada a {}: {} puntos, {:.2} km, {} min",
            form.vehicle_id,
            route.coords.len(),
            route.distance_km(),
            route.duration_minutes()
        );

        self.route = Some(route.clone());
        self.bounds = bounds;
        self.transition(WorkflowState::RouteReady);

        Ok(RouteComputation {
            vehicle_id: form.vehicle_id,
            distance_km: route.distance_km(),
            duration_minutes: route.duration_minutes(),
            route,
            bounds,
            request,
        })
    }

    async fn validate(&self, form: RouteForm) -> AppResult<ValidatedForm> {
        let origin = resolved_address(form.origin.as_ref());
        let destination = resolved_address(form.destination.as_ref());
        let (Some(origin), Some(destination)) = (origin, destination) else {
            return Err(validation_error(MISSING_PLACES_MESSAGE));
        };

        if is_blank(form.vehicle_id.as_deref()) {
            return Err(validation_error(MISSING_VEHICLE_MESSAGE));
        }
        let vehicle_id = form.vehicle_id.unwrap_or_default().trim().to_string();

        if self.fleet.read().await.vehicle(&vehicle_id).is_none() {
            return Err(not_found_error("Vehicle", &vehicle_id));
        }

        Ok(ValidatedForm {
            vehicle_id,
            origin,
            destination,
            waypoints: split_waypoints(&form.waypoints_text),
            optimize: form.optimize,
        })
    }

    fn transition(&mut self, next: WorkflowState) {
        log::debug!("🔄 Route workflow: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Registrar el error y volver a `Idle`; la flota no se modifica
    fn fail(&mut self, error: AppError) -> AppError {
        self.transition(WorkflowState::Error);
        log::warn!("⚠️ Error al calcular ruta: {}", error);
        self.last_error = Some(error.to_string());
        self.transition(WorkflowState::Idle);
        error
    }
}

fn resolved_address(place: Option<&PlaceSelection>) -> Option<String> {
    place
        .filter(|p| p.is_resolved())
        .map(|p| p.formatted_address.trim().to_string())
}
