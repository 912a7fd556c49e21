//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores de la aplicación
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::clients::maps_client::MapsError;
use crate::utils::polyline::DecodeError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Falta origen, destino o vehículo antes de enviar
    #[error("{0}")]
    Validation(String),

    /// Cuerpo JSON mal formado o con tipos incorrectos
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    /// Fallo de red o respuesta no 2xx del servicio externo
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Polyline inválida: {0}")]
    Decode(#[from] DecodeError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<MapsError> for AppError {
    fn from(err: MapsError) -> Self {
        match err {
            MapsError::NotFound(body) | MapsError::Upstream { body, .. } => AppError::Transport(body),
            other => AppError::Transport(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidPayload(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidPayload(err.to_string())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(msg) => {
                log::warn!("⚠️ Validation error: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::InvalidPayload(msg) => {
                log::warn!("⚠️ Invalid payload: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid Payload".to_string(),
                        message: "The request body is not valid JSON for this endpoint".to_string(),
                        details: Some(json!({ "parse_error": msg })),
                        code: Some("INVALID_PAYLOAD".to_string()),
                    },
                )
            }

            AppError::InvalidFields(e) => {
                log::warn!("⚠️ Invalid fields: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Transport(msg) => {
                log::error!("❌ Transport error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Transport Error".to_string(),
                        message: msg.clone(),
                        details: Some(json!({ "external_api_error": msg })),
                        code: Some("TRANSPORT_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                log::info!("🔍 Not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Decode(e) => {
                log::error!("❌ Polyline decode error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Decode Error".to_string(),
                        message: format!("Polyline inválida: {}", e),
                        details: None,
                        code: Some("DECODE_ERROR".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_body_is_surfaced() {
        let err: AppError = MapsError::Upstream {
            status: 502,
            body: "{\"status\":\"ZERO_RESULTS\"}".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "{\"status\":\"ZERO_RESULTS\"}");
    }

    #[test]
    fn test_maps_not_found_is_transport() {
        let err: AppError = MapsError::NotFound("{\"detail\":\"Not Found\"}".to_string()).into();
        assert!(matches!(err, AppError::Transport(ref body) if body == "{\"detail\":\"Not Found\"}"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_malformed_json_is_invalid_payload() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::InvalidPayload(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            validation_error("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            not_found_error("Vehicle", "vehicle-9").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Transport("timeout".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
