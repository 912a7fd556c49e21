//! DTOs para el servicio de mapas
//!
//! Estructuras de los endpoints `/maps/directions`, `/maps/geocode` y
//! `/maps/nearby_search` del microservicio de logística.

use serde::{Deserialize, Serialize};

use crate::models::place::{LatLng, PlaceSuggestion};

/// Request para calcular una ruta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
    #[serde(rename = "vehicleId")]
    pub vehicle_id: String,
    pub optimize: bool,
}

/// Response del servicio de direcciones
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub polyline: String,
    pub distance_m: f64,
    pub duration_s: f64,
    /// Paradas reordenadas, si el servicio optimizó el orden
    #[serde(default)]
    pub waypoints: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeocodeRequest {
    pub address: String,
}

/// Resultado de geocodificación (Google o Nominatim)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResult {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub formatted_address: Option<String>,
    pub display_name: Option<String>,
}

impl GeocodeResult {
    /// Convertir en sugerencia si tiene coordenadas finitas y una dirección mostrable
    pub fn to_suggestion(&self) -> Option<PlaceSuggestion> {
        let location = LatLng::new(self.lat?, self.lng?)?;
        let label = non_empty(self.formatted_address.as_deref())
            .or_else(|| non_empty(self.display_name.as_deref()))?;

        Some(PlaceSuggestion {
            label: label.to_string(),
            lat: location.lat,
            lng: location.lng,
        })
    }
}

/// El endpoint de geocodificación devuelve un arreglo o un único objeto
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GeocodePayload {
    Many(Vec<GeocodeResult>),
    One(GeocodeResult),
}

impl From<GeocodePayload> for Vec<GeocodeResult> {
    fn from(payload: GeocodePayload) -> Self {
        match payload {
            GeocodePayload::Many(results) => results,
            GeocodePayload::One(result) => vec![result],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbySearchRequest {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    pub keyword: String,
}

/// Lugar cercano devuelto por la búsqueda por proximidad
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyPlace {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
}

impl NearbyPlace {
    pub fn to_suggestion(&self) -> Option<PlaceSuggestion> {
        let location = LatLng::new(self.lat?, self.lng?)?;
        let name = non_empty(self.name.as_deref());
        let address = non_empty(self.vicinity.as_deref())
            .or_else(|| non_empty(self.formatted_address.as_deref()));

        let label = match (name, address) {
            (Some(name), Some(address)) => format!("{}, {}", name, address),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => return None,
        };

        Some(PlaceSuggestion {
            label,
            lat: location.lat,
            lng: location.lng,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
