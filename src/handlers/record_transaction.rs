use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    appstate::AppState, codec, middleware::request_tracing::RequestTraceData,
    model::error::ApiError,
};

#[derive(Debug, Deserialize)]
pub struct SaveTransaction {
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveConfirmation {
    pub message: String,
}

pub async fn save(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
    Json(payload): Json<SaveTransaction>,
) -> Result<Json<SaveConfirmation>, ApiError> {
    let request_id = request_trace_data.get_id();

    // an empty data field counts as missing, same as an absent key
    let data = match payload.data.as_deref() {
        Some(data) if !data.is_empty() => data,
        _ => return Err(ApiError::MissingPayload),
    };

    info!("[{}] save called with {:?}", request_id, data);

    let draft = codec::decode(data)?;
    let saved = app_state.get_db().save(draft, None)?;

    info!("[{}] recorded transaction {}: {:?}", request_id, saved.id, saved);

    Ok(Json(SaveConfirmation {
        message: String::from("Transaction saved"),
    }))
}
