use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::Serialize;

use crate::codec::DecodeError;

#[derive(Debug)]
pub enum ApiError {
    MissingPayload,
    InvalidFormat,
    InvalidAmount,
    InternalError(String),
    PathNotFound(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<rusqlite::Error> for ApiError {
    fn from(value: rusqlite::Error) -> ApiError {
        error!("rusqlite error: {}", value);
        ApiError::InternalError(String::from("Internal Error"))
    }
}

impl From<DecodeError> for ApiError {
    fn from(value: DecodeError) -> ApiError {
        match value {
            DecodeError::InvalidFormat => ApiError::InvalidFormat,
            DecodeError::InvalidAmount => ApiError::InvalidAmount,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::MissingPayload => (StatusCode::BAD_REQUEST, String::from("No data provided")),
            Self::InvalidFormat => (StatusCode::BAD_REQUEST, String::from("Invalid data format")),
            Self::InvalidAmount => (StatusCode::BAD_REQUEST, String::from("Invalid amount")),
            Self::InternalError(public_reason) => (StatusCode::INTERNAL_SERVER_ERROR, public_reason),
            Self::PathNotFound(route) => {
                (StatusCode::NOT_FOUND, format!("Unknown route: {}", route))
            }
        };

        warn!("{} response with error={}", status, error);

        (status, Json(ErrorResponse { error })).into_response()
    }
}
