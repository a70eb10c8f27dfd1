use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::entities::purchase_order::PurchaseOrderStatus;
use crate::errors::ServiceError;
use crate::handlers::{default_limit, default_page};
use crate::services::purchase_orders::{CreatePurchaseOrder, NewOrderLine, ReceiptLine};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineBody {
    pub item_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub supplier_id: Uuid,
    pub date: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub payment_terms: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderLineBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLineBody {
    pub item_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReceiveOrderRequest {
    pub items: Vec<ReceiptLineBody>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

pub async fn create_order(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let input = CreatePurchaseOrder {
        supplier_id: body.supplier_id,
        date: body.date,
        expected_delivery: body.expected_delivery,
        payment_terms: body.payment_terms,
        shipping_address: body.shipping_address,
        notes: body.notes,
        items: body
            .items
            .into_iter()
            .map(|line| NewOrderLine {
                item_id: line.item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                description: line.description,
            })
            .collect(),
    };
    let (order, items) = state
        .services
        .purchase_orders
        .create(&ctx, &meta, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "purchaseOrder": order, "items": items })),
    ))
}

pub async fn list_orders(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Value>, ServiceError> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(PurchaseOrderStatus::from_str(raw).ok_or_else(|| {
            ServiceError::ValidationError(format!("unknown status '{raw}'"))
        })?),
        None => None,
    };
    let (orders, pagination) = state
        .services
        .purchase_orders
        .list(&ctx, status, query.page, query.limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "purchaseOrders": orders,
        "pagination": pagination,
    })))
}

pub async fn get_order(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServiceError> {
    let (order, items) = state.services.purchase_orders.get(&ctx, id).await?;

    Ok(Json(json!({
        "success": true,
        "purchaseOrder": order,
        "items": items,
    })))
}

pub async fn receive_order(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Path(id): Path<Uuid>,
    Json(body): Json<ReceiveOrderRequest>,
) -> Result<Json<Value>, ServiceError> {
    let lines = body
        .items
        .into_iter()
        .map(|line| ReceiptLine {
            item_id: line.item_id,
            quantity: line.quantity,
        })
        .collect();
    let status = state
        .services
        .purchase_orders
        .receive(&ctx, &meta, id, lines)
        .await?;

    Ok(Json(json!({ "success": true, "status": status.as_str() })))
}

pub async fn set_order_status(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Path(id): Path<Uuid>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<Value>, ServiceError> {
    let status = PurchaseOrderStatus::from_str(&body.status).ok_or_else(|| {
        ServiceError::ValidationError(format!("unknown status '{}'", body.status))
    })?;
    let order = state
        .services
        .purchase_orders
        .set_status(&ctx, &meta, id, status)
        .await?;

    Ok(Json(json!({ "success": true, "purchaseOrder": order })))
}
