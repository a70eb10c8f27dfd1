//! Item CRUD and catalog queries. Quantity is off limits here: any change
//! to stock levels goes through the movement services so the ledger stays
//! consistent.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::db::DbPool;
use crate::entities::inventory_transaction::{self, MovementType};
use crate::entities::{business_settings, inventory_item};
use crate::errors::{from_transaction_error, ServiceError};
use crate::services::audit::{AuditAction, AuditRecorder, AuditTarget};
use crate::services::Pagination;

const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub min_quantity: i32,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}

/// Partial update. `None` fields are left untouched; there is deliberately
/// no quantity field.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<Option<String>>,
    pub min_quantity: Option<i32>,
    pub cost_price: Option<Option<Decimal>>,
    pub selling_price: Option<Option<Decimal>>,
    pub location: Option<Option<String>>,
    pub category_id: Option<Option<Uuid>>,
    pub supplier_id: Option<Option<Uuid>>,
}

/// Typed listing filter, combined into one parameterized query.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Substring match over name or SKU.
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    /// Only items at or below the business's low stock threshold.
    pub low_stock: bool,
}

#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    async fn sku_taken(
        &self,
        business_id: Uuid,
        sku: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ServiceError> {
        let mut select = inventory_item::Entity::find()
            .filter(inventory_item::Column::BusinessId.eq(business_id))
            .filter(inventory_item::Column::Sku.eq(sku));
        if let Some(id) = exclude {
            select = select.filter(inventory_item::Column::Id.ne(id));
        }
        Ok(select.one(self.db.as_ref()).await?.is_some())
    }

    /// Creates an item. A nonzero opening quantity also gets an
    /// `adjustment` movement row so the ledger sums to the stored quantity
    /// from day one.
    #[instrument(skip(self, meta, input), fields(sku = %input.sku))]
    pub async fn create_item(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        input: NewInventoryItem,
    ) -> Result<inventory_item::Model, ServiceError> {
        if input.name.trim().is_empty() || input.sku.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "name and sku are required".to_string(),
            ));
        }
        if input.quantity < 0 || input.min_quantity < 0 {
            return Err(ServiceError::ValidationError(
                "quantities cannot be negative".to_string(),
            ));
        }
        if self.sku_taken(ctx.business_id, &input.sku, None).await? {
            return Err(ServiceError::Conflict(format!(
                "An item with SKU '{}' already exists",
                input.sku
            )));
        }

        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, inventory_item::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let item = inventory_item::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(input.name.clone()),
                        sku: Set(input.sku.clone()),
                        description: Set(input.description.clone()),
                        quantity: Set(input.quantity),
                        min_quantity: Set(input.min_quantity),
                        cost_price: Set(input.cost_price),
                        selling_price: Set(input.selling_price),
                        location: Set(input.location.clone()),
                        category_id: Set(input.category_id),
                        supplier_id: Set(input.supplier_id),
                        business_id: Set(ctx.business_id),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    if input.quantity > 0 {
                        inventory_transaction::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            business_id: Set(ctx.business_id),
                            item_id: Set(item.id),
                            quantity: Set(input.quantity),
                            r#type: Set(MovementType::Adjustment.as_str().to_string()),
                            notes: Set(Some("Initial quantity".to_string())),
                            user_id: Set(ctx.user_id),
                            purchase_order_id: Set(None),
                            created_at: Set(now),
                        }
                        .insert(txn)
                        .await?;
                    }

                    AuditRecorder::record(
                        txn,
                        &ctx,
                        &meta,
                        AuditAction::Created,
                        AuditTarget::Inventory,
                        item.id,
                        Some(json!({
                            "name": item.name,
                            "sku": item.sku,
                            "quantity": item.quantity,
                        })),
                    )
                    .await?;

                    info!(item_id = %item.id, sku = %item.sku, "inventory item created");
                    Ok(item)
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    /// Updates descriptive fields. Stock level cannot be edited here.
    #[instrument(skip(self, meta, update), fields(item_id = %item_id))]
    pub async fn update_item(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        item_id: Uuid,
        update: ItemUpdate,
    ) -> Result<inventory_item::Model, ServiceError> {
        let existing = inventory_item::Entity::find_by_id(item_id)
            .filter(inventory_item::Column::BusinessId.eq(ctx.business_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item".to_string()))?;

        if let Some(sku) = &update.sku {
            if sku.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "sku cannot be empty".to_string(),
                ));
            }
            if sku != &existing.sku
                && self.sku_taken(ctx.business_id, sku, Some(item_id)).await?
            {
                return Err(ServiceError::Conflict(format!(
                    "An item with SKU '{sku}' already exists"
                )));
            }
        }

        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, inventory_item::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let mut active: inventory_item::ActiveModel = existing.into();
                    if let Some(name) = update.name {
                        active.name = Set(name);
                    }
                    if let Some(sku) = update.sku {
                        active.sku = Set(sku);
                    }
                    if let Some(description) = update.description {
                        active.description = Set(description);
                    }
                    if let Some(min_quantity) = update.min_quantity {
                        active.min_quantity = Set(min_quantity);
                    }
                    if let Some(cost_price) = update.cost_price {
                        active.cost_price = Set(cost_price);
                    }
                    if let Some(selling_price) = update.selling_price {
                        active.selling_price = Set(selling_price);
                    }
                    if let Some(location) = update.location {
                        active.location = Set(location);
                    }
                    if let Some(category_id) = update.category_id {
                        active.category_id = Set(category_id);
                    }
                    if let Some(supplier_id) = update.supplier_id {
                        active.supplier_id = Set(supplier_id);
                    }
                    active.updated_at = Set(Utc::now());
                    let item = active.update(txn).await?;

                    AuditRecorder::record(
                        txn,
                        &ctx,
                        &meta,
                        AuditAction::Updated,
                        AuditTarget::Inventory,
                        item.id,
                        Some(json!({ "name": item.name, "sku": item.sku })),
                    )
                    .await?;

                    Ok(item)
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    /// Deletes an item, keeping its movement history. The deleted row is
    /// serialized into the audit entry.
    #[instrument(skip(self, meta), fields(item_id = %item_id))]
    pub async fn delete_item(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        item_id: Uuid,
    ) -> Result<(), ServiceError> {
        let existing = inventory_item::Entity::find_by_id(item_id)
            .filter(inventory_item::Column::BusinessId.eq(ctx.business_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item".to_string()))?;

        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let snapshot = serde_json::to_value(&existing)
                        .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

                    inventory_item::Entity::delete_by_id(existing.id)
                        .exec(txn)
                        .await?;

                    AuditRecorder::record(
                        txn,
                        &ctx,
                        &meta,
                        AuditAction::Deleted,
                        AuditTarget::Inventory,
                        existing.id,
                        Some(snapshot),
                    )
                    .await?;

                    info!(item_id = %existing.id, "inventory item deleted");
                    Ok(())
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    /// One item with its most recent movements, newest first.
    pub async fn get_item(
        &self,
        ctx: &AuthContext,
        item_id: Uuid,
    ) -> Result<(inventory_item::Model, Vec<inventory_transaction::Model>), ServiceError> {
        let item = inventory_item::Entity::find_by_id(item_id)
            .filter(inventory_item::Column::BusinessId.eq(ctx.business_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item".to_string()))?;

        let history = inventory_transaction::Entity::find()
            .filter(inventory_transaction::Column::ItemId.eq(item.id))
            .filter(inventory_transaction::Column::BusinessId.eq(ctx.business_id))
            .order_by_desc(inventory_transaction::Column::CreatedAt)
            .limit(10)
            .all(self.db.as_ref())
            .await?;

        Ok((item, history))
    }

    /// Paginated listing with the typed filter, most recently updated
    /// first.
    #[instrument(skip(self, filter))]
    pub async fn list_items(
        &self,
        ctx: &AuthContext,
        filter: ItemFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<inventory_item::Model>, Pagination), ServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let mut cond =
            Condition::all().add(inventory_item::Column::BusinessId.eq(ctx.business_id));

        if let Some(search) = filter.search.filter(|s| !s.is_empty()) {
            cond = cond.add(
                Condition::any()
                    .add(inventory_item::Column::Name.contains(&search))
                    .add(inventory_item::Column::Sku.contains(&search)),
            );
        }
        if let Some(category_id) = filter.category_id {
            cond = cond.add(inventory_item::Column::CategoryId.eq(category_id));
        }
        if filter.low_stock {
            let threshold = business_settings::Entity::find()
                .filter(business_settings::Column::BusinessId.eq(ctx.business_id))
                .one(self.db.as_ref())
                .await?
                .map(|s| s.low_stock_threshold)
                .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
            cond = cond.add(Expr::col(inventory_item::Column::Quantity).lte(threshold));
        }

        let paginator = inventory_item::Entity::find()
            .filter(cond)
            .order_by_desc(inventory_item::Column::UpdatedAt)
            .paginate(self.db.as_ref(), limit);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok((items, Pagination::new(total, page, limit)))
    }
}
