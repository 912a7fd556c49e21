//! Servicio de autocompletado de direcciones
//!
//! Geocodifica el texto ingresado con debounce y, si hay pocos resultados,
//! completa con una búsqueda por proximidad. Cada búsqueda toma un número de
//! secuencia por sesión: solo la más reciente llega al cliente. La sesión
//! sale de la tabla cuando su última búsqueda termina.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::clients::maps_client::{MapsApi, MapsError};
use crate::config::environment::AutocompleteConfig;
use crate::dto::maps_dto::NearbySearchRequest;
use crate::models::place::{AutocompleteOutcome, PlaceSuggestion};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::meets_min_length;

pub const DEFAULT_SESSION: &str = "default";

/// Números de secuencia globales; `latest` solo guarda sesiones con búsquedas en curso
#[derive(Debug, Default)]
struct Sequences {
    next: u64,
    latest: HashMap<String, u64>,
}

pub struct PlaceAutocompleteService {
    maps: Arc<dyn MapsApi>,
    config: AutocompleteConfig,
    sequences: Mutex<Sequences>,
}

/// Búsqueda en curso; al soltarse libera la sesión si sigue siendo la última
struct Ticket<'a> {
    service: &'a PlaceAutocompleteService,
    session: &'a str,
    seq: u64,
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        let mut sequences = self.service.lock_sequences();
        if sequences.latest.get(self.session) == Some(&self.seq) {
            sequences.latest.remove(self.session);
        }
    }
}

impl PlaceAutocompleteService {
    pub fn new(maps: Arc<dyn MapsApi>, config: AutocompleteConfig) -> Self {
        Self {
            maps,
            config,
            sequences: Mutex::new(Sequences::default()),
        }
    }

    /// Buscar sugerencias para `query` dentro de `session`
    pub async fn search(&self, session: &str, query: &str) -> AppResult<AutocompleteOutcome> {
        let query = query.trim();
        let ticket = self.start(session);
        let seq = ticket.seq;

        if !meets_min_length(query, self.config.min_chars) {
            return Ok(AutocompleteOutcome::Suggestions(Vec::new()));
        }

        tokio::time::sleep(self.config.debounce).await;
        if !self.is_latest(session, seq) {
            log::debug!("⏭️ Búsqueda '{}' reemplazada durante el debounce", query);
            return Ok(AutocompleteOutcome::Superseded);
        }

        let results = match self.maps.geocode(query).await {
            Ok(results) => results,
            Err(MapsError::NotFound(_)) => Vec::new(),
            Err(e) if self.is_latest(session, seq) => return Err(e.into()),
            Err(_) => return Ok(AutocompleteOutcome::Superseded),
        };

        if !self.is_latest(session, seq) {
            log::debug!("⏭️ Respuesta obsoleta descartada para '{}'", query);
            return Ok(AutocompleteOutcome::Superseded);
        }

        let mut suggestions: Vec<PlaceSuggestion> = results
            .iter()
            .filter_map(|r| r.to_suggestion())
            .take(self.config.max_suggestions)
            .collect();

        let Some(first) = suggestions.first().cloned() else {
            log::info!("🔍 Sin resultados para '{}'", query);
            return Err(AppError::NotFound(format!(
                "No se encontraron direcciones para \"{}\"",
                query
            )));
        };

        if suggestions.len() <= self.config.nearby_threshold {
            suggestions = self.enrich_with_nearby(query, &first, suggestions).await;

            if !self.is_latest(session, seq) {
                return Ok(AutocompleteOutcome::Superseded);
            }
        }

        log::info!("✅ {} sugerencias para '{}'", suggestions.len(), query);
        Ok(AutocompleteOutcome::Suggestions(suggestions))
    }

    /// Anteponer lugares cercanos al primer resultado; un fallo no es fatal
    async fn enrich_with_nearby(
        &self,
        query: &str,
        center: &PlaceSuggestion,
        primary: Vec<PlaceSuggestion>,
    ) -> Vec<PlaceSuggestion> {
        let request = NearbySearchRequest {
            lat: center.lat,
            lng: center.lng,
            radius: self.config.nearby_radius_m,
            keyword: query.to_string(),
        };

        let nearby: Vec<PlaceSuggestion> = match self.maps.nearby_search(&request).await {
            Ok(places) => places.iter().filter_map(|p| p.to_suggestion()).collect(),
            Err(e) => {
                log::warn!("⚠️ Nearby search falló, se usan solo los resultados de geocoding: {}", e);
                return primary;
            }
        };

        let mut combined = nearby;
        combined.extend(primary);
        combined.truncate(self.config.max_suggestions);
        combined
    }

    /// Registrar una búsqueda nueva como la última de su sesión
    fn start<'a>(&'a self, session: &'a str) -> Ticket<'a> {
        let mut sequences = self.lock_sequences();
        sequences.next += 1;
        let seq = sequences.next;
        sequences.latest.insert(session.to_string(), seq);

        Ticket {
            service: self,
            session,
            seq,
        }
    }

    fn is_latest(&self, session: &str, seq: u64) -> bool {
        self.lock_sequences().latest.get(session) == Some(&seq)
    }

    fn lock_sequences(&self) -> std::sync::MutexGuard<'_, Sequences> {
        self.sequences
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
