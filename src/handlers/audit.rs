use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthContext;
use crate::errors::ServiceError;
use crate::handlers::{default_limit, default_page};
use crate::services::audit::AuditQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditListQuery {
    pub search: Option<String>,
    pub action: Option<String>,
    pub item_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

pub async fn list_audit_logs(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<AuditListQuery>,
) -> Result<Json<Value>, ServiceError> {
    let filter = AuditQuery {
        search: query.search,
        action: query.action,
        item_type: query.item_type,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let (logs, pagination) = state
        .services
        .audit
        .list(&ctx, filter, query.page, query.limit)
        .await?;

    Ok(Json(json!({
        "success": true,
        "logs": logs,
        "pagination": pagination,
    })))
}
