use crate::{
    error::{Error, Result},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(rename = "longUrl")]
    long_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortUrl")]
    short_url: String,
}

/// POST /shorten
///
/// Body `{"longUrl": "..."}`; responds with the new id as `{"shortUrl": "..."}`.
/// A request without a JSON content type is treated like an empty body.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => return Err(Error::LongUrlRequired),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(Error::BodyTooLarge)
        }
        Err(rejection) => return Err(Error::InvalidBody(rejection.body_text())),
    };

    let long_url = request.long_url.unwrap_or_default();
    let short_url = state.store.create(&long_url)?;
    tracing::debug!("Shortened {} -> {}", long_url, short_url);

    Ok(Json(ShortenResponse { short_url }))
}
