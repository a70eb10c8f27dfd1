use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::errors::ServiceError;
use crate::services::stock_movements::MovementRequest;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MovementBody {
    pub quantity: i32,
    pub notes: Option<String>,
}

pub async fn receive_stock(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Path(id): Path<Uuid>,
    Json(body): Json<MovementBody>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let transaction = state
        .services
        .stock_movements
        .receive(
            &ctx,
            &meta,
            MovementRequest {
                item_id: id,
                quantity: body.quantity,
                notes: body.notes,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "transaction": transaction })),
    ))
}

pub async fn deploy_stock(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Path(id): Path<Uuid>,
    Json(body): Json<MovementBody>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let transaction = state
        .services
        .stock_movements
        .deploy(
            &ctx,
            &meta,
            MovementRequest {
                item_id: id,
                quantity: body.quantity,
                notes: body.notes,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "transaction": transaction })),
    ))
}
