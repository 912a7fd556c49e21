use serde::{Deserialize, Serialize};

use crate::models::{place::Bounds, place::PlaceSelection, route::Route, route::RouteRequest};

fn default_optimize() -> bool {
    true
}

// Formulario de cálculo de ruta tal como lo llena el usuario
#[derive(Debug, Clone, Deserialize)]
pub struct RouteForm {
    pub vehicle_id: Option<String>,
    pub origin: Option<PlaceSelection>,
    pub destination: Option<PlaceSelection>,
    /// Una dirección por línea
    #[serde(default)]
    pub waypoints_text: String,
    #[serde(default = "default_optimize")]
    pub optimize: bool,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self {
            vehicle_id: None,
            origin: None,
            destination: None,
            waypoints_text: String::new(),
            optimize: default_optimize(),
        }
    }
}

// Resultado de un cálculo de ruta exitoso
#[derive(Debug, Clone, Serialize)]
pub struct RouteComputation {
    pub vehicle_id: String,
    pub route: Route,
    pub distance_km: f64,
    pub duration_minutes: i64,
    pub bounds: Option<Bounds>,
    pub request: RouteRequest,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}
