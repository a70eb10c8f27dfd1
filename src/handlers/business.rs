use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::errors::ServiceError;
use crate::services::business::{SettingsUpdate, SetupBusiness};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    pub name: String,
    pub business_type: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub tax_rate: Decimal,
    pub fiscal_year_start: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub name: Option<String>,
    pub business_type: Option<String>,
    pub address: Option<String>,
    pub currency: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub fiscal_year_start: Option<String>,
    pub low_stock_alerts: Option<bool>,
    pub auto_order_suggestions: Option<bool>,
    pub low_stock_threshold: Option<i32>,
}

/// Onboarding endpoint. Deliberately unauthenticated: it runs before the
/// tenant (and thus any caller context) exists.
pub async fn setup_business(
    State(state): State<AppState>,
    Json(body): Json<SetupRequest>,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let (business, settings) = state
        .services
        .business
        .setup(SetupBusiness {
            name: body.name,
            business_type: body.business_type,
            address: body.address,
            currency: body.currency,
            tax_rate: body.tax_rate,
            fiscal_year_start: body.fiscal_year_start,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "business": business, "settings": settings })),
    ))
}

pub async fn get_settings(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Value>, ServiceError> {
    let (business, settings) = state.services.business.get_settings(&ctx).await?;

    Ok(Json(json!({
        "success": true,
        "business": business,
        "settings": settings,
    })))
}

pub async fn update_settings(
    State(state): State<AppState>,
    ctx: AuthContext,
    meta: RequestMeta,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<Value>, ServiceError> {
    let update = SettingsUpdate {
        name: body.name,
        business_type: body.business_type.map(Some),
        address: body.address.map(Some),
        currency: body.currency,
        tax_rate: body.tax_rate,
        fiscal_year_start: body.fiscal_year_start.map(Some),
        low_stock_alerts: body.low_stock_alerts,
        auto_order_suggestions: body.auto_order_suggestions,
        low_stock_threshold: body.low_stock_threshold,
    };
    let (business, settings) = state
        .services
        .business
        .update_settings(&ctx, &meta, update)
        .await?;

    Ok(Json(json!({
        "success": true,
        "business": business,
        "settings": settings,
    })))
}

pub async fn clear_business_data(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServiceError> {
    state.services.business.clear_business_data(&ctx, id).await?;
    Ok(Json(json!({ "success": true })))
}
