//! Modelo de Vehicle
//!
//! Vehículos creados bajo demanda; no se persisten.

use serde::{Deserialize, Serialize};

use super::route::Route;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
}

impl Vehicle {
    /// Vehículo número `seq`, con nombre por defecto "Vehículo N"
    pub fn numbered(seq: usize, name: Option<String>) -> Self {
        Self {
            id: format!("vehicle-{}", seq),
            name: name.unwrap_or_else(|| format!("Vehículo {}", seq)),
            current_location: None,
            route: None,
        }
    }

    /// Asignar una ruta, reemplazando la anterior
    pub fn assign_route(&mut self, route: Route, origin: String) {
        self.route = Some(route);
        self.current_location = Some(origin);
    }
}
