//! Services module
//!
//! Este módulo contiene la lógica de negocio: el flujo de cálculo de ruta
//! y el autocompletado de direcciones sobre el servicio de mapas.

pub mod place_autocomplete_service;
pub mod route_workflow_service;

pub use place_autocomplete_service::*;
pub use route_workflow_service::*;
