use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use log::info;
use serde::Serialize;

use crate::{
    aggregate,
    appstate::AppState,
    middleware::request_tracing::RequestTraceData,
    model::{error::ApiError, transaction::TransactionType},
};

#[derive(Debug, Serialize)]
pub struct TotalSellsResponse {
    pub total_sells: i64,
}

#[derive(Debug, Serialize)]
pub struct TotalBuysResponse {
    pub total_buys: i64,
}

#[derive(Debug, Serialize)]
pub struct SellsSummaryResponse {
    pub total_amount: i64,
    pub customer_count: usize,
}

#[derive(Debug, Serialize)]
pub struct BuysSummaryResponse {
    pub total_amount: i64,
    pub product_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RevenueSummaryResponse {
    pub total_revenue: i64,
    pub due_to_customers: i64,
    pub due_from_suppliers: i64,
}

pub async fn total_sells(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<TotalSellsResponse>, ApiError> {
    info!("[{}] total_sells", request_trace_data.get_id());

    let total = aggregate::total_by_type(app_state.get_db(), TransactionType::Sell)?;

    Ok(Json(TotalSellsResponse { total_sells: total }))
}

pub async fn total_buys(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<TotalBuysResponse>, ApiError> {
    info!("[{}] total_buys", request_trace_data.get_id());

    let total = aggregate::total_by_type(app_state.get_db(), TransactionType::Buy)?;

    Ok(Json(TotalBuysResponse { total_buys: total }))
}

pub async fn sells_summary(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<SellsSummaryResponse>, ApiError> {
    info!("[{}] sells_summary", request_trace_data.get_id());

    let summary = aggregate::summary_by_type(app_state.get_db(), TransactionType::Sell)?;

    Ok(Json(SellsSummaryResponse {
        total_amount: summary.total_amount,
        customer_count: summary.distinct_count,
    }))
}

pub async fn buys_summary(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<BuysSummaryResponse>, ApiError> {
    info!("[{}] buys_summary", request_trace_data.get_id());

    let summary = aggregate::summary_by_type(app_state.get_db(), TransactionType::Buy)?;

    Ok(Json(BuysSummaryResponse {
        total_amount: summary.total_amount,
        product_count: summary.distinct_count,
    }))
}

pub async fn revenue_summary(
    State(app_state): State<Arc<AppState>>,
    Extension(request_trace_data): Extension<RequestTraceData>,
) -> Result<Json<RevenueSummaryResponse>, ApiError> {
    info!("[{}] revenue_summary", request_trace_data.get_id());

    let summary = aggregate::revenue_summary(app_state.get_db())?;

    Ok(Json(RevenueSummaryResponse {
        total_revenue: summary.total_revenue,
        due_to_customers: summary.due_to_customers,
        due_from_suppliers: summary.due_from_suppliers,
    }))
}
