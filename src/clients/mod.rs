//! Clients - HTTP Clients for External APIs
//!
//! This module contains the client for the logistics maps service.

pub mod maps_client;
#[cfg(test)]
pub mod stub_maps_client;

pub use maps_client::{HttpMapsClient, MapsApi, MapsError};
