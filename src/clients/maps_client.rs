//! Cliente HTTP del servicio de mapas
//!
//! `MapsApi` es la costura entre los servicios y el microservicio externo;
//! `HttpMapsClient` la implementa con reqwest.

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::dto::maps_dto::*;

/// Errores al comunicarse con el servicio de mapas
#[derive(Error, Debug)]
pub enum MapsError {
    #[error("Error de red: {0}")]
    Transport(String),

    /// Respuesta no 2xx; `body` es el payload de error del servidor
    #[error("Maps API error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Solo el geocoding interpreta un 404 como "sin resultados"
    #[error("{0}")]
    NotFound(String),

    #[error("Respuesta inválida del servicio de mapas: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MapsError {
    fn from(err: reqwest::Error) -> Self {
        MapsError::Transport(err.to_string())
    }
}

#[async_trait]
pub trait MapsApi: Send + Sync {
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError>;

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, MapsError>;

    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<Vec<NearbyPlace>, MapsError>;
}

#[derive(Clone)]
pub struct HttpMapsClient {
    inner: reqwest::Client,
    base: Url,
}

impl HttpMapsClient {
    pub fn new(base: &str, timeout: Duration) -> anyhow::Result<Self> {
        // Sin la barra final `join` reemplaza el último segmento del prefijo
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = normalized
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("FleetRouting/1.0")
            .build()?;

        Ok(Self { inner, base })
    }

    /// Resolver un endpoint relativo al prefijo configurado
    fn endpoint(&self, path: &str) -> Result<Url, MapsError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| MapsError::Transport(format!("error joining url: {e}")))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, MapsError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;

        log::debug!("📤 POST {}", url);

        let response = self.inner.post(url).json(body).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        log::debug!("📡 Maps response status: {}", status);

        if !status.is_success() {
            return Err(MapsError::Upstream {
                status: status.as_u16(),
                body: response_text,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| MapsError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl MapsApi for HttpMapsClient {
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError> {
        log::info!(
            "🚚 Calculando ruta {} -> {} ({} paradas)",
            request.origin,
            request.destination,
            request.waypoints.len()
        );
        self.post("maps/directions", request).await
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, MapsError> {
        log::info!("🗺️ Geocoding address: {}", address);

        let request = GeocodeRequest {
            address: address.to_string(),
        };
        let payload: GeocodePayload = match self.post("maps/geocode", &request).await {
            Err(MapsError::Upstream { status, body }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(MapsError::NotFound(body));
            }
            other => other?,
        };
        Ok(payload.into())
    }

    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<Vec<NearbyPlace>, MapsError> {
        log::info!(
            "📍 Nearby search ({}, {}) radio {} m",
            request.lat,
            request.lng,
            request.radius
        );
        self.post("maps/nearby_search", request).await
    }
}
