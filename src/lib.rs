use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use tower::ServiceBuilder;

use crate::appstate::AppState;
use crate::db::Db;

pub mod aggregate;
pub mod appstate;
pub mod codec;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod model;

pub fn router(db: Db) -> Router {
    let app_state = Arc::new(AppState::new(db));

    Router::new()
        .route(
            "/api/transaction",
            post(crate::handlers::record_transaction::save),
        )
        .route("/api/sells", get(crate::handlers::reports::total_sells))
        .route("/api/buys", get(crate::handlers::reports::total_buys))
        .route(
            "/api/sells-summary",
            get(crate::handlers::reports::sells_summary),
        )
        .route(
            "/api/buys-summary",
            get(crate::handlers::reports::buys_summary),
        )
        .route(
            "/api/revenue-summary",
            get(crate::handlers::reports::revenue_summary),
        )
        .fallback(crate::handlers::path_not_found::handler_404)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(
            crate::middleware::request_tracing::request_tracing,
        )))
        .with_state(app_state)
}
