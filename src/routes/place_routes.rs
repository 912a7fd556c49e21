use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::place_controller::PlaceController;
use crate::dto::place_dto::{AutocompleteQuery, AutocompleteResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_place_router() -> Router<AppState> {
    Router::new().route("/autocomplete", get(autocomplete))
}

async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let controller = PlaceController::new(state.autocomplete.clone());
    let response = controller.autocomplete(query).await?;
    Ok(Json(response))
}
