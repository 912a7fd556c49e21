//! Modelos de lugares y coordenadas
//!
//! Coordenadas, sugerencias de autocompletado, lugares resueltos y el estado
//! de un campo de búsqueda de dirección.

use serde::{Deserialize, Serialize};

/// Par de coordenadas en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Crear un par de coordenadas, descartando valores no finitos
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }
}

/// Rectángulo que contiene todos los puntos de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Ajustar el viewport a todos los puntos; `None` si no hay puntos
    pub fn fit(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            south_west: *first,
            north_east: *first,
        };

        for point in &points[1..] {
            bounds.extend(*point);
        }

        Some(bounds)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }
}

/// Sugerencia de lugar devuelta por el autocompletado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

impl PlaceSuggestion {
    pub fn location(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Lugar resuelto (seleccionado) en un campo de origen o destino
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSelection {
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
}

impl PlaceSelection {
    /// Un lugar está resuelto si tiene una dirección formateada no vacía
    pub fn is_resolved(&self) -> bool {
        !self.formatted_address.trim().is_empty()
    }
}

impl From<PlaceSuggestion> for PlaceSelection {
    fn from(suggestion: PlaceSuggestion) -> Self {
        let location = suggestion.location();
        Self {
            formatted_address: suggestion.label,
            location: Some(location),
        }
    }
}

/// Resultado de una búsqueda de autocompletado
#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteOutcome {
    Suggestions(Vec<PlaceSuggestion>),
    /// Una búsqueda más reciente reemplazó a esta
    Superseded,
}

/// Estado de un campo de búsqueda de dirección
///
/// API para clientes de la librería: el servidor HTTP no guarda estado de
/// formulario, quien embebe el crate combina `PlaceInput` con
/// `PlaceAutocompleteService::search` para cada campo.
#[derive(Debug, Clone, Default)]
pub struct PlaceInput {
    display_value: String,
    suggestions: Vec<PlaceSuggestion>,
    selected: Option<PlaceSelection>,
    error: Option<String>,
}

impl PlaceInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_value(&self) -> &str {
        &self.display_value
    }

    pub fn suggestions(&self) -> &[PlaceSuggestion] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&PlaceSelection> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// El usuario escribe: la selección anterior deja de ser válida
    pub fn set_query(&mut self, query: &str) {
        self.display_value = query.to_string();
        self.selected = None;
    }

    /// Aplicar el resultado de una búsqueda; las respuestas obsoletas se ignoran
    pub fn apply_outcome(&mut self, outcome: AutocompleteOutcome) {
        if let AutocompleteOutcome::Suggestions(suggestions) = outcome {
            self.suggestions = suggestions;
            self.error = None;
        }
    }

    /// Mostrar un error sin bloquear la escritura
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.suggestions.clear();
        self.error = Some(message.into());
    }

    /// Confirmar una sugerencia como lugar resuelto
    pub fn select(&mut self, index: usize) -> Option<&PlaceSelection> {
        if index >= self.suggestions.len() {
            return None;
        }

        let suggestion = self.suggestions.swap_remove(index);
        self.suggestions.clear();
        self.error = None;
        self.display_value = suggestion.label.clone();
        self.selected = Some(suggestion.into());
        self.selected.as_ref()
    }
}
