//! Utilidades de validación
//!
//! Funciones helper para normalizar la entrada de los formularios
//! antes de llamar a los servicios externos.

/// Separar el texto de paradas intermedias: una dirección por línea,
/// sin espacios sobrantes ni líneas vacías, en el mismo orden
pub fn split_waypoints(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Verificar que una consulta tenga el largo mínimo (en caracteres, sin espacios extremos)
pub fn meets_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Validar que un string no esté vacío
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
