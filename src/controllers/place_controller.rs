use std::sync::Arc;

use crate::dto::place_dto::{AutocompleteQuery, AutocompleteResponse};
use crate::services::place_autocomplete_service::{PlaceAutocompleteService, DEFAULT_SESSION};
use crate::utils::errors::AppError;

pub struct PlaceController {
    service: Arc<PlaceAutocompleteService>,
}

impl PlaceController {
    pub fn new(service: Arc<PlaceAutocompleteService>) -> Self {
        Self { service }
    }

    pub async fn autocomplete(&self, query: AutocompleteQuery) -> Result<AutocompleteResponse, AppError> {
        let session = query
            .session
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SESSION);

        let outcome = self.service.search(session, &query.q).await?;
        Ok(outcome.into())
    }
}
