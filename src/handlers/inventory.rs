use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::errors::ServiceError;
use crate::handlers::{default_limit, default_page};
use crate::services::inventory::{ItemFilter, ItemUpdate, NewInventoryItem};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub min_quantity: i32,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub min_quantity: Option<i32>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListQuery {
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub low_stock: bool,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

pub async fn create_item(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Json(body): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let item = state
        .services
        .inventory
        .create_item(
            &ctx,
            &meta,
            NewInventoryItem {
                name: body.name,
                sku: body.sku,
                description: body.description,
                quantity: body.quantity,
                min_quantity: body.min_quantity,
                cost_price: body.cost_price,
                selling_price: body.selling_price,
                location: body.location,
                category_id: body.category_id,
                supplier_id: body.supplier_id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "item": item })),
    ))
}

pub async fn list_items(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<Value>, ServiceError> {
    let filter = ItemFilter {
        search: query.search,
        category_id: query.category_id,
        low_stock: query.low_stock,
    };
    let (items, pagination) = state
        .services
        .inventory
        .list_items(&ctx, filter, query.page, query.limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "items": items,
        "pagination": pagination,
    })))
}

pub async fn get_item(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServiceError> {
    let (item, transactions) = state.services.inventory.get_item(&ctx, id).await?;

    Ok(Json(json!({
        "success": true,
        "item": item,
        "transactions": transactions,
    })))
}

pub async fn update_item(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<Value>, ServiceError> {
    let update = ItemUpdate {
        name: body.name,
        sku: body.sku,
        description: body.description.map(Some),
        min_quantity: body.min_quantity,
        cost_price: body.cost_price.map(Some),
        selling_price: body.selling_price.map(Some),
        location: body.location.map(Some),
        category_id: body.category_id.map(Some),
        supplier_id: body.supplier_id.map(Some),
    };
    let item = state
        .services
        .inventory
        .update_item(&ctx, &meta, id, update)
        .await?;

    Ok(Json(json!({ "success": true, "item": item })))
}

pub async fn delete_item(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServiceError> {
    state.services.inventory.delete_item(&ctx, &meta, id).await?;
    Ok(Json(json!({ "success": true })))
}
