use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::ai::{AiError, AiResponse};

#[derive(Debug)]
pub enum ApiError {
    /// Missing field, malformed body or rejected input.
    BadRequest(String),
    /// The model or the transport to it failed.
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        if err.is_validation() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(message) | Self::Upstream(message) => message,
        };
        (status, Json(AiResponse::failure(message))).into_response()
    }
}
