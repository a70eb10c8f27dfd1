//! HTTP layer. Handlers extract the caller context and request body,
//! delegate to the service layer, and wrap results in the
//! `{"success": ...}` envelope. No business rules live here.
//!
//! Query structs spell out `page` and `limit` instead of flattening a
//! shared struct: serde's flatten buffers urlencoded values as strings
//! and fails on numeric fields.

pub mod audit;
pub mod business;
pub mod inventory;
pub mod purchase_orders;
pub mod stock_movements;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub(crate) fn default_page() -> u64 {
    1
}

pub(crate) fn default_limit() -> u64 {
    10
}

/// Liveness probe with a database ping.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match crate::db::check_connection(state.db.as_ref()).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}
