//! Cliente de mapas en memoria para tests
//!
//! Devuelve respuestas preconfiguradas y registra cada llamada.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use super::maps_client::{MapsApi, MapsError};
use crate::dto::maps_dto::*;

#[derive(Default)]
pub struct StubMapsClient {
    pub directions_response: Mutex<Option<Result<DirectionsResponse, MapsError>>>,
    pub geocode_response: Mutex<Option<Result<Vec<GeocodeResult>, MapsError>>>,
    pub nearby_response: Mutex<Option<Result<Vec<NearbyPlace>, MapsError>>>,
    /// Latencia simulada del geocoding
    pub geocode_delay: Mutex<Duration>,
    pub directions_calls: Mutex<Vec<DirectionsRequest>>,
    pub geocode_calls: Mutex<Vec<String>>,
    pub nearby_calls: Mutex<Vec<NearbySearchRequest>>,
}

impl StubMapsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directions(self, response: Result<DirectionsResponse, MapsError>) -> Self {
        *self.directions_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_geocode(self, response: Result<Vec<GeocodeResult>, MapsError>) -> Self {
        *self.geocode_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_nearby(self, response: Result<Vec<NearbyPlace>, MapsError>) -> Self {
        *self.nearby_response.lock().unwrap() = Some(response);
        self
    }

    pub fn directions_count(&self) -> usize {
        self.directions_calls.lock().unwrap().len()
    }

    pub fn geocode_count(&self) -> usize {
        self.geocode_calls.lock().unwrap().len()
    }

    pub fn nearby_count(&self) -> usize {
        self.nearby_calls.lock().unwrap().len()
    }
}

fn replay<T: Clone>(slot: &Mutex<Option<Result<T, MapsError>>>) -> Result<T, MapsError> {
    match slot.lock().unwrap().as_ref() {
        Some(Ok(value)) => Ok(value.clone()),
        Some(Err(MapsError::NotFound(msg))) => Err(MapsError::NotFound(msg.clone())),
        Some(Err(MapsError::Upstream { status, body })) => Err(MapsError::Upstream {
            status: *status,
            body: body.clone(),
        }),
        Some(Err(other)) => Err(MapsError::Transport(other.to_string())),
        None => Err(MapsError::Transport("no stub configured".to_string())),
    }
}

#[async_trait]
impl MapsApi for StubMapsClient {
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError> {
        self.directions_calls.lock().unwrap().push(request.clone());
        replay(&self.directions_response)
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, MapsError> {
        self.geocode_calls.lock().unwrap().push(address.to_string());
        let delay = *self.geocode_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        replay(&self.geocode_response)
    }

    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<Vec<NearbyPlace>, MapsError> {
        self.nearby_calls.lock().unwrap().push(request.clone());
        replay(&self.nearby_response)
    }
}
