//! DTOs de la API
//!
//! Requests y responses de los endpoints propios y del servicio de mapas.

pub mod common_dto;
pub mod maps_dto;
pub mod place_dto;
pub mod route_dto;
pub mod vehicle_dto;
