//! Modelos del sistema
//!
//! Vehículos, rutas, solicitudes de ruta y lugares. Todo vive en memoria;
//! la persistencia queda en los servicios externos.

pub mod place;
pub mod route;
pub mod vehicle;

pub use place::*;
pub use route::*;
pub use vehicle::*;
