//! Fleet routing
//!
//! Backend del mapa de flota: decodificación de polylines, cálculo y
//! asignación de rutas a vehículos, y autocompletado de direcciones sobre
//! el microservicio de mapas.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
