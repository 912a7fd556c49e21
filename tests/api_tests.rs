use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use fleet_routing::clients::maps_client::{MapsApi, MapsError};
use fleet_routing::config::environment::{AutocompleteConfig, EnvironmentConfig};
use fleet_routing::dto::maps_dto::*;
use fleet_routing::routes::create_app;
use fleet_routing::state::AppState;

const POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// Servicio de mapas falso: respuestas fijas y contadores de llamadas
#[derive(Default)]
struct FakeMaps {
    directions_calls: Mutex<usize>,
    geocode_calls: Mutex<usize>,
    nearby_calls: Mutex<usize>,
    fail_directions: bool,
}

#[async_trait]
impl MapsApi for FakeMaps {
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, MapsError> {
        *self.directions_calls.lock().unwrap() += 1;
        if self.fail_directions {
            return Err(MapsError::Upstream {
                status: 502,
                body: "{\"status\":\"REQUEST_DENIED\"}".to_string(),
            });
        }
        Ok(DirectionsResponse {
            polyline: POLYLINE.to_string(),
            distance_m: 12_345.0,
            duration_s: 1_530.0,
            waypoints: Some(request.waypoints.clone()),
        })
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, MapsError> {
        *self.geocode_calls.lock().unwrap() += 1;
        if address.starts_with("zz") {
            return Err(MapsError::NotFound("{\"error\":\"not_found\"}".to_string()));
        }
        Ok(vec![GeocodeResult {
            lat: Some(-33.43),
            lng: Some(-70.62),
            formatted_address: None,
            display_name: Some(format!("{}, Santiago, Chile", address)),
        }])
    }

    async fn nearby_search(&self, _request: &NearbySearchRequest) -> Result<Vec<NearbyPlace>, MapsError> {
        *self.nearby_calls.lock().unwrap() += 1;
        Ok(vec![
            NearbyPlace {
                name: Some("Metro Pedro de Valdivia".to_string()),
                lat: Some(-33.425),
                lng: Some(-70.613),
                vicinity: Some("Providencia".to_string()),
                formatted_address: None,
            },
            NearbyPlace {
                name: Some("Sin coordenadas".to_string()),
                lat: None,
                lng: None,
                vicinity: None,
                formatted_address: None,
            },
        ])
    }
}

fn create_test_app(maps: Arc<FakeMaps>) -> Router {
    let config = EnvironmentConfig {
        autocomplete: AutocompleteConfig {
            debounce: Duration::ZERO,
            ..AutocompleteConfig::default()
        },
        ..EnvironmentConfig::default()
    };
    create_app(AppState::new(config, maps))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn route_form(vehicle_id: Option<&str>) -> Value {
    json!({
        "vehicle_id": vehicle_id,
        "origin": { "formatted_address": "Av. Providencia 1234, Santiago" },
        "destination": { "formatted_address": "Av. Apoquindo 3000, Las Condes" },
        "waypoints_text": "Los Leones 100\n\n  Macul 22  "
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(Arc::new(FakeMaps::default()));
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_list_vehicles() {
    let app = create_test_app(Arc::new(FakeMaps::default()));

    let (status, body) = send(&app, "POST", "/api/vehicles", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "vehicle-1");
    assert_eq!(body["data"]["name"], "Vehículo 1");

    let (_, body) = send(&app, "POST", "/api/vehicles", Some(json!({ "name": "Camión Sur" }))).await;
    assert_eq!(body["data"]["id"], "vehicle-2");

    let (status, body) = send(&app, "GET", "/api/vehicles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/api/vehicles/vehicle-9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_vehicle_name() {
    let app = create_test_app(Arc::new(FakeMaps::default()));
    let (status, body) = send(&app, "POST", "/api/vehicles", Some(json!({ "name": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_vehicle_without_body() {
    let app = create_test_app(Arc::new(FakeMaps::default()));
    let (status, body) = send(&app, "POST", "/api/vehicles", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "vehicle-1");
}

#[tokio::test]
async fn test_malformed_vehicle_body_is_rejected() {
    let app = create_test_app(Arc::new(FakeMaps::default()));

    let (status, body) = send_raw(&app, "/api/vehicles", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYLOAD");

    let (_, vehicles) = send(&app, "GET", "/api/vehicles", None).await;
    assert!(vehicles.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_route_form_is_json_error() {
    let maps = Arc::new(FakeMaps::default());
    let app = create_test_app(maps.clone());

    let (status, body) = send_raw(&app, "/api/routes/compute", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYLOAD");
    assert!(body["details"]["parse_error"].is_string());

    let (status, body) = send_raw(&app, "/api/routes/compute", "{\"vehicle_id\": 7}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYLOAD");
    assert_eq!(*maps.directions_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_compute_route_assigns_vehicle_and_records_request() {
    let maps = Arc::new(FakeMaps::default());
    let app = create_test_app(maps.clone());
    send(&app, "POST", "/api/vehicles", Some(json!({}))).await;

    let (status, body) = send(&app, "POST", "/api/routes/compute", Some(route_form(Some("vehicle-1")))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*maps.directions_calls.lock().unwrap(), 1);
    assert_eq!(body["route"]["coords"].as_array().unwrap().len(), 3);
    assert_eq!(body["route"]["distance_m"], 12_345.0);
    assert_eq!(body["route"]["waypoints"], json!(["Los Leones 100", "Macul 22"]));
    assert_eq!(body["request"]["status"], "completed");
    assert!(body["bounds"].is_object());

    let (_, vehicle) = send(&app, "GET", "/api/vehicles/vehicle-1", None).await;
    assert_eq!(vehicle["route"]["duration_s"], 1_530.0);
    assert_eq!(vehicle["current_location"], "Av. Providencia 1234, Santiago");

    let (_, history) = send(&app, "GET", "/api/routes/requests", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["vehicle_id"], "vehicle-1");
}

#[tokio::test]
async fn test_compute_route_without_vehicle() {
    let maps = Arc::new(FakeMaps::default());
    let app = create_test_app(maps.clone());

    let (status, body) = send(&app, "POST", "/api/routes/compute", Some(route_form(None))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("selecciona un vehículo"));
    assert_eq!(*maps.directions_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_compute_route_surfaces_upstream_payload() {
    let maps = Arc::new(FakeMaps {
        fail_directions: true,
        ..FakeMaps::default()
    });
    let app = create_test_app(maps.clone());
    send(&app, "POST", "/api/vehicles", Some(json!({}))).await;

    let (status, body) = send(&app, "POST", "/api/routes/compute", Some(route_form(Some("vehicle-1")))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "{\"status\":\"REQUEST_DENIED\"}");

    let (_, history) = send(&app, "GET", "/api/routes/requests", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_history_most_recent_first_with_limit() {
    let app = create_test_app(Arc::new(FakeMaps::default()));
    send(&app, "POST", "/api/vehicles", Some(json!({}))).await;
    send(&app, "POST", "/api/vehicles", Some(json!({}))).await;

    send(&app, "POST", "/api/routes/compute", Some(route_form(Some("vehicle-1")))).await;
    send(&app, "POST", "/api/routes/compute", Some(route_form(Some("vehicle-2")))).await;

    let (_, history) = send(&app, "GET", "/api/routes/requests?limit=1", None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["vehicle_id"], "vehicle-2");
}

#[tokio::test]
async fn test_autocomplete_short_query() {
    let maps = Arc::new(FakeMaps::default());
    let app = create_test_app(maps.clone());

    let (status, body) = send(&app, "GET", "/api/places/autocomplete?q=A", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["suggestions"].as_array().unwrap().is_empty());
    assert_eq!(*maps.geocode_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_autocomplete_enriches_with_nearby() {
    let maps = Arc::new(FakeMaps::default());
    let app = create_test_app(maps.clone());

    let (status, body) = send(
        &app,
        "GET",
        "/api/places/autocomplete?q=Providencia&session=origen",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["superseded"], false);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["label"], "Metro Pedro de Valdivia, Providencia");
    assert_eq!(suggestions[1]["label"], "Providencia, Santiago, Chile");
    assert_eq!(*maps.nearby_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_autocomplete_not_found() {
    let app = create_test_app(Arc::new(FakeMaps::default()));

    let (status, body) = send(&app, "GET", "/api/places/autocomplete?q=zzzz", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
