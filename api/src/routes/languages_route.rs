//! GET /api/languages — canonical tags of the supported language set.

use axum::Json;
use serde::Serialize;

/// Response payload for /api/languages.
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    /// Canonical lowercase tags, in listing order.
    pub languages: Vec<&'static str>,
}

/// Handler: GET /api/languages
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: code_assist::supported_tags(),
    })
}
