use axum::{body::Body, http::Request};

use crate::model::error::ApiError;

pub async fn handler_404(request: Request<Body>) -> ApiError {
    ApiError::PathNotFound(format!("{} {}", request.method(), request.uri()))
}
