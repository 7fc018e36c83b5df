use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Long URL is required")]
    LongUrlRequired,

    #[error("{0}")]
    InvalidUrl(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body too large")]
    BodyTooLarge,

    #[error("Short URL not found")]
    NotFound,

    #[error("no unused short id after {attempts} attempt(s)")]
    GenerationExhausted { attempts: u32 },
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::LongUrlRequired | Error::InvalidUrl(_) | Error::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::GenerationExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body for every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
