//! Utilidades del sistema
//!
//! Manejo de errores, validación de formularios y codificación de polylines.

pub mod errors;
pub mod polyline;
pub mod validation;

pub use errors::*;
