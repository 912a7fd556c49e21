use serde::{Deserialize, Serialize};

use crate::models::place::{AutocompleteOutcome, PlaceSuggestion};

// Query de autocompletado: `session` agrupa las búsquedas de un mismo campo
#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: String,
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<PlaceSuggestion>,
    pub superseded: bool,
}

impl From<AutocompleteOutcome> for AutocompleteResponse {
    fn from(outcome: AutocompleteOutcome) -> Self {
        match outcome {
            AutocompleteOutcome::Suggestions(suggestions) => Self {
                suggestions,
                superseded: false,
            },
            AutocompleteOutcome::Superseded => Self {
                suggestions: Vec::new(),
                superseded: true,
            },
        }
    }
}
