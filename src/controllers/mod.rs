//! Controladores
//!
//! Adaptan los requests HTTP a los servicios y a la flota en memoria.

pub mod place_controller;
pub mod route_controller;
pub mod vehicle_controller;
