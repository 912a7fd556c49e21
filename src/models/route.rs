//! Modelo de Route y RouteRequest
//!
//! Una `Route` es el resultado del servicio de direcciones ya decodificado.
//! Un `RouteRequest` es el registro inmutable de cada cálculo completado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::place::LatLng;

/// Ruta asignada a un vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub coords: Vec<LatLng>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub waypoints: Vec<String>,
}

impl Route {
    pub fn distance_km(&self) -> f64 {
        (self.distance_m / 10.0).round() / 100.0
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.duration_s / 60.0).round() as i64
    }
}

/// Estado de la solicitud de ruta - el flujo actual solo produce `Completed`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Completed,
}

/// Registro de una solicitud de ruta; inmutable una vez creado
#[derive(Debug, Clone, Serialize)]
pub struct RouteRequest {
    id: Uuid,
    vehicle_id: String,
    origin: String,
    destination: String,
    waypoints: Vec<String>,
    created_at: DateTime<Utc>,
    status: RequestStatus,
}

impl RouteRequest {
    pub fn completed(
        vehicle_id: String,
        origin: String,
        destination: String,
        waypoints: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            origin,
            destination,
            waypoints,
            created_at: Utc::now(),
            status: RequestStatus::Completed,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn waypoints(&self) -> &[String] {
        &self.waypoints
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }
}
