//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto para desarrollo local.

use anyhow::{anyhow, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
    /// URL base del microservicio de mapas (logística)
    pub maps_api_url: String,
    pub maps_timeout: Duration,
    pub autocomplete: AutocompleteConfig,
}

/// Parámetros del autocompletado de direcciones
#[derive(Debug, Clone)]
pub struct AutocompleteConfig {
    pub debounce: Duration,
    pub min_chars: usize,
    pub max_suggestions: usize,
    /// Con esta cantidad de resultados o menos se intenta la búsqueda por proximidad
    pub nearby_threshold: usize,
    pub nearby_radius_m: u32,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_chars: 2,
            max_suggestions: 5,
            nearby_threshold: 2,
            nearby_radius_m: 500,
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            log_level: tracing::Level::DEBUG,
            maps_api_url: "http://localhost:8000".to_string(),
            maps_timeout: Duration::from_secs(20),
            autocomplete: AutocompleteConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let default_level = if environment == "development" {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        let autocomplete = AutocompleteConfig {
            debounce: Duration::from_millis(parse_var(
                "AUTOCOMPLETE_DEBOUNCE_MS",
                defaults.autocomplete.debounce.as_millis() as u64,
            )?),
            min_chars: parse_var("AUTOCOMPLETE_MIN_CHARS", defaults.autocomplete.min_chars)?,
            max_suggestions: parse_var(
                "AUTOCOMPLETE_MAX_SUGGESTIONS",
                defaults.autocomplete.max_suggestions,
            )?,
            nearby_threshold: defaults.autocomplete.nearby_threshold,
            nearby_radius_m: parse_var("NEARBY_RADIUS_M", defaults.autocomplete.nearby_radius_m)?,
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_list(&origins))
                .unwrap_or_default(),
            log_level: parse_var("LOG_LEVEL", default_level)?,
            maps_api_url: env::var("MAPS_API_URL").unwrap_or(defaults.maps_api_url),
            maps_timeout: Duration::from_secs(parse_var(
                "MAPS_TIMEOUT_SECS",
                defaults.maps_timeout.as_secs(),
            )?),
            autocomplete,
            environment,
        })
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("{name} must be valid: {e}")),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{name} value is not valid unicode")),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
