//! Codificación de polylines
//!
//! Implementa el formato "encoded polyline" de Google: deltas de coordenadas
//! empaquetados en varints de 5 bits sobre caracteres ASCII imprimibles.
//! El servicio de direcciones devuelve la ruta en este formato.

use thiserror::Error;

use crate::models::place::LatLng;

/// Precisión estándar (1e-5 grados)
pub const DEFAULT_PRECISION: u32 = 5;

/// Con más de 7 decimales una latitud ya no cabe en 32 bits
const MAX_PRECISION: u32 = 7;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: u32 = 0x20;
const CHUNK_MASK: u32 = 0x1f;
/// Siete bloques de 5 bits cubren los 32 bits del acumulador
const MAX_CHUNKS: u32 = 7;

/// Errores de decodificación de una polyline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid character {byte:#04x} at position {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("truncated value at position {position}: continuation bit set on last character")]
    TruncatedValue { position: usize },

    #[error("missing longitude after latitude ending at position {position}")]
    MissingLongitude { position: usize },

    #[error("value starting at position {position} does not fit in 32 bits")]
    Overflow { position: usize },

    #[error("unsupported precision {0} (expected 0..=7)")]
    UnsupportedPrecision(u32),

    #[error("coordinate {index} is too far from the previous one to encode in 32 bits")]
    OutOfRange { index: usize },
}

/// Decodificar una polyline con la precisión estándar de 5 decimales
pub fn decode(encoded: &str) -> Result<Vec<LatLng>, DecodeError> {
    decode_with_precision(encoded, DEFAULT_PRECISION)
}

/// Decodificar una polyline con precisión arbitraria (p.ej. 6 para polyline6)
pub fn decode_with_precision(encoded: &str, precision: u32) -> Result<Vec<LatLng>, DecodeError> {
    let factor = scale_factor(precision)?;
    let bytes = encoded.as_bytes();

    let mut coordinates = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += read_delta(bytes, &mut index)?;

        if index >= bytes.len() {
            return Err(DecodeError::MissingLongitude { position: index - 1 });
        }
        lng += read_delta(bytes, &mut index)?;

        coordinates.push(LatLng {
            lat: lat as f64 / factor,
            lng: lng as f64 / factor,
        });
    }

    Ok(coordinates)
}

/// Codificar coordenadas con la precisión estándar
pub fn encode(coordinates: &[LatLng]) -> Result<String, DecodeError> {
    encode_with_precision(coordinates, DEFAULT_PRECISION)
}

/// Codificar coordenadas con precisión arbitraria
pub fn encode_with_precision(coordinates: &[LatLng], precision: u32) -> Result<String, DecodeError> {
    let factor = scale_factor(precision)?;

    let mut output = String::with_capacity(coordinates.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for (index, point) in coordinates.iter().enumerate() {
        let lat = (point.lat * factor).round() as i64;
        let lng = (point.lng * factor).round() as i64;

        let out_of_range = |_| DecodeError::OutOfRange { index };
        let lat_delta = i32::try_from(lat - prev_lat).map_err(out_of_range)?;
        let lng_delta = i32::try_from(lng - prev_lng).map_err(out_of_range)?;

        write_delta(lat_delta, &mut output);
        write_delta(lng_delta, &mut output);

        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(output)
}

fn scale_factor(precision: u32) -> Result<f64, DecodeError> {
    if precision > MAX_PRECISION {
        return Err(DecodeError::UnsupportedPrecision(precision));
    }
    Ok(10f64.powi(precision as i32))
}

/// Leer un varint con signo a partir de `index`, avanzando el cursor
fn read_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let start = *index;
    let mut result: u64 = 0;
    let mut chunks = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::TruncatedValue { position: *index - 1 });
        };
        if !(CHAR_OFFSET..=126).contains(&byte) {
            return Err(DecodeError::InvalidCharacter { position: *index, byte });
        }
        if chunks == MAX_CHUNKS {
            return Err(DecodeError::Overflow { position: start });
        }

        let value = u32::from(byte - CHAR_OFFSET);
        result |= u64::from(value & CHUNK_MASK) << (chunks * 5);
        chunks += 1;
        *index += 1;

        if value < CONTINUATION_BIT {
            break;
        }
    }

    let result = u32::try_from(result).map_err(|_| DecodeError::Overflow { position: start })?;
    let shifted = (result >> 1) as i32;

    // Bit menos significativo = signo (complemento a uno)
    let delta = if result & 1 != 0 { !shifted } else { shifted };
    Ok(i64::from(delta))
}

/// Escribir un delta en complemento a uno; cualquier `i32` cabe en 32 bits
fn write_delta(delta: i32, output: &mut String) {
    let mut value = (delta as u32) << 1;
    if delta < 0 {
        value = !value;
    }

    while value >= CONTINUATION_BIT {
        let chunk = (CONTINUATION_BIT | (value & CHUNK_MASK)) as u8 + CHAR_OFFSET;
        output.push(chunk as char);
        value >>= 5;
    }
    output.push((value as u8 + CHAR_OFFSET) as char);
}
