//! Configuración del proyecto
//!
//! Variables de entorno del servidor, del cliente de mapas
//! y del autocompletado.

pub mod environment;

pub use environment::*;
