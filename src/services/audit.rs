//! Audit trail: append-only recorder plus the read-side query service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::db::DbPool;
use crate::entities::audit_log;
use crate::errors::ServiceError;
use crate::services::Pagination;

/// What happened. Stored as a lowercase verb in the past tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Received,
    Deployed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
            AuditAction::Received => "received",
            AuditAction::Deployed => "deployed",
        }
    }
}

/// What kind of entity the action targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTarget {
    Inventory,
    PurchaseOrder,
    Business,
}

impl AuditTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditTarget::Inventory => "inventory",
            AuditTarget::PurchaseOrder => "purchaseOrder",
            AuditTarget::Business => "business",
        }
    }
}

/// Append-only writer. Generic over the connection so the insert joins
/// whatever transaction the calling operation opened; an audit row must
/// never outlive a rolled-back data effect.
pub struct AuditRecorder;

impl AuditRecorder {
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        ctx: &AuthContext,
        meta: &RequestMeta,
        action: AuditAction,
        target: AuditTarget,
        item_id: Uuid,
        details: Option<serde_json::Value>,
    ) -> Result<audit_log::Model, ServiceError> {
        let entry = audit_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            action: Set(action.as_str().to_string()),
            item_type: Set(target.as_str().to_string()),
            item_id: Set(item_id),
            details: Set(details.map(|d| d.to_string())),
            ip_address: Set(meta.ip_address.clone()),
            device_info: Set(meta.device_info.clone()),
            business_id: Set(ctx.business_id),
            user_id: Set(ctx.user_id),
            created_at: Set(Utc::now()),
        };

        let row = entry.insert(conn).await?;
        Ok(row)
    }
}

/// Typed filter for the audit log listing. Translated into a single
/// parameterized query; no string-assembled SQL.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Substring match over the serialized details payload.
    pub search: Option<String>,
    /// Exact action match, e.g. "received".
    pub action: Option<String>,
    /// Exact target kind match, e.g. "purchaseOrder".
    pub item_type: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub end_date: Option<DateTime<Utc>>,
}

impl AuditQuery {
    fn into_condition(self, business_id: Uuid) -> Condition {
        let mut cond = Condition::all().add(audit_log::Column::BusinessId.eq(business_id));

        if let Some(search) = self.search.filter(|s| !s.is_empty()) {
            cond = cond.add(audit_log::Column::Details.contains(&search));
        }
        if let Some(action) = self.action.filter(|s| !s.is_empty()) {
            cond = cond.add(audit_log::Column::Action.eq(action));
        }
        if let Some(item_type) = self.item_type.filter(|s| !s.is_empty()) {
            cond = cond.add(audit_log::Column::ItemType.eq(item_type));
        }
        if let Some(start) = self.start_date {
            cond = cond.add(audit_log::Column::CreatedAt.gte(start));
        }
        if let Some(end) = self.end_date {
            cond = cond.add(audit_log::Column::CreatedAt.lte(end));
        }
        cond
    }
}

/// Read side of the audit trail.
#[derive(Clone)]
pub struct AuditLogService {
    db: Arc<DbPool>,
}

impl AuditLogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Paginated, filtered listing of the caller's audit trail, newest
    /// first.
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        ctx: &AuthContext,
        query: AuditQuery,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<audit_log::Model>, Pagination), ServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let paginator = audit_log::Entity::find()
            .filter(query.into_condition(ctx.business_id))
            .order_by_desc(audit_log::Column::CreatedAt)
            .paginate(self.db.as_ref(), limit);

        let total = paginator.num_items().await?;
        let logs = paginator.fetch_page(page - 1).await?;

        Ok((logs, Pagination::new(total, page, limit)))
    }
}
