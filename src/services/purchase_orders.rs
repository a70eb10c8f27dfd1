//! Purchase order workflow: creation with atomic tenant-scoped numbering,
//! manual status updates, and the transactional receipt loop.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::db::DbPool;
use crate::entities::inventory_transaction::{self, MovementType};
use crate::entities::purchase_order::{self, PurchaseOrderStatus};
use crate::entities::{
    business, inventory_item, purchase_order_counter, purchase_order_item, supplier,
};
use crate::errors::{from_transaction_error, ServiceError};
use crate::services::audit::{AuditAction, AuditRecorder, AuditTarget};
use crate::services::ledger::InventoryLedger;
use crate::services::Pagination;

#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub item_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePurchaseOrder {
    pub supplier_id: Uuid,
    pub date: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub payment_terms: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewOrderLine>,
}

#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub item_id: Uuid,
    pub quantity: i32,
}

/// `PO-<year>-<zero-padded ordinal>`.
fn format_po_number(year: i32, seq: i32) -> String {
    format!("PO-{year}-{seq:03}")
}

#[derive(Clone)]
pub struct PurchaseOrderService {
    db: Arc<DbPool>,
}

impl PurchaseOrderService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Allocates the next PO ordinal for this business and year.
    ///
    /// Runs inside the caller's transaction: the counter row update is
    /// atomic, so two concurrent creators serialize on it instead of both
    /// counting existing orders and colliding on the same number.
    async fn next_po_number<C: ConnectionTrait>(
        conn: &C,
        business_id: Uuid,
        year: i32,
    ) -> Result<String, ServiceError> {
        let bumped = purchase_order_counter::Entity::update_many()
            .col_expr(
                purchase_order_counter::Column::LastSeq,
                Expr::col(purchase_order_counter::Column::LastSeq).add(1),
            )
            .filter(purchase_order_counter::Column::BusinessId.eq(business_id))
            .filter(purchase_order_counter::Column::Year.eq(year))
            .exec(conn)
            .await?;

        let seq = if bumped.rows_affected == 0 {
            purchase_order_counter::ActiveModel {
                business_id: Set(business_id),
                year: Set(year),
                last_seq: Set(1),
            }
            .insert(conn)
            .await?;
            1
        } else {
            purchase_order_counter::Entity::find_by_id((business_id, year))
                .one(conn)
                .await?
                .map(|counter| counter.last_seq)
                .ok_or_else(|| ServiceError::NotFound("Purchase order counter".to_string()))?
        };

        Ok(format_po_number(year, seq))
    }

    /// Creates a purchase order with its lines, totals, and a fresh
    /// tenant-scoped number, all in one transaction.
    #[instrument(skip(self, meta, input), fields(supplier_id = %input.supplier_id))]
    pub async fn create(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        input: CreatePurchaseOrder,
    ) -> Result<(purchase_order::Model, Vec<purchase_order_item::Model>), ServiceError> {
        if input.items.is_empty() {
            return Err(ServiceError::ValidationError(
                "purchase order needs at least one line".to_string(),
            ));
        }
        for line in &input.items {
            if line.quantity <= 0 {
                return Err(ServiceError::ValidationError(
                    "line quantity must be positive".to_string(),
                ));
            }
            if line.unit_price < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "unit price cannot be negative".to_string(),
                ));
            }
        }

        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, (purchase_order::Model, Vec<purchase_order_item::Model>), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        let owner = business::Entity::find_by_id(ctx.business_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| ServiceError::NotFound("Business".to_string()))?;

                        supplier::Entity::find_by_id(input.supplier_id)
                            .filter(supplier::Column::BusinessId.eq(ctx.business_id))
                            .one(txn)
                            .await?
                            .ok_or_else(|| ServiceError::NotFound("Supplier".to_string()))?;

                        // Every referenced item must belong to the caller's
                        // business.
                        for line in &input.items {
                            inventory_item::Entity::find_by_id(line.item_id)
                                .filter(
                                    inventory_item::Column::BusinessId.eq(ctx.business_id),
                                )
                                .one(txn)
                                .await?
                                .ok_or_else(|| ServiceError::NotFound("Item".to_string()))?;
                        }

                        let subtotal: Decimal = input
                            .items
                            .iter()
                            .map(|line| Decimal::from(line.quantity) * line.unit_price)
                            .sum();
                        let tax = subtotal * owner.tax_rate / Decimal::from(100);
                        let total = subtotal + tax;

                        let year = Utc::now().year();
                        let po_number =
                            Self::next_po_number(txn, ctx.business_id, year).await?;

                        let now = Utc::now();
                        let order = purchase_order::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            po_number: Set(po_number.clone()),
                            supplier_id: Set(input.supplier_id),
                            date: Set(input.date),
                            expected_delivery: Set(input.expected_delivery),
                            payment_terms: Set(input.payment_terms.clone()),
                            shipping_address: Set(input.shipping_address.clone()),
                            notes: Set(input.notes.clone()),
                            status: Set(PurchaseOrderStatus::Draft.as_str().to_string()),
                            subtotal: Set(subtotal),
                            tax: Set(tax),
                            total: Set(total),
                            business_id: Set(ctx.business_id),
                            created_at: Set(now),
                            updated_at: Set(now),
                        }
                        .insert(txn)
                        .await?;

                        let mut lines = Vec::with_capacity(input.items.len());
                        for line in &input.items {
                            let row = purchase_order_item::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                purchase_order_id: Set(order.id),
                                item_id: Set(line.item_id),
                                quantity: Set(line.quantity),
                                unit_price: Set(line.unit_price),
                                total: Set(Decimal::from(line.quantity) * line.unit_price),
                                description: Set(line.description.clone()),
                            }
                            .insert(txn)
                            .await?;
                            lines.push(row);
                        }

                        AuditRecorder::record(
                            txn,
                            &ctx,
                            &meta,
                            AuditAction::Created,
                            AuditTarget::PurchaseOrder,
                            order.id,
                            Some(json!({
                                "poNumber": po_number,
                                "supplierId": input.supplier_id,
                                "total": total,
                            })),
                        )
                        .await?;

                        info!(po_number = %order.po_number, total = %total, "purchase order created");
                        Ok((order, lines))
                    })
                },
            )
            .await
            .map_err(from_transaction_error)
    }

    /// Receives quantities against an order.
    ///
    /// Every received line becomes a ledger increment plus a movement row
    /// tagged with the PO; the status is then recomputed from the
    /// cumulative received totals, so a later receipt of the remainder
    /// moves `partial` to `received`. The per-line loop and the status
    /// update are one atomic unit.
    #[instrument(skip(self, meta, lines), fields(po_id = %po_id))]
    pub async fn receive(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        po_id: Uuid,
        lines: Vec<ReceiptLine>,
    ) -> Result<PurchaseOrderStatus, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "no received lines supplied".to_string(),
            ));
        }
        for line in &lines {
            if line.quantity <= 0 {
                return Err(ServiceError::ValidationError(
                    "received quantity must be positive".to_string(),
                ));
            }
        }

        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, PurchaseOrderStatus, ServiceError>(move |txn| {
                Box::pin(async move {
                    let order = purchase_order::Entity::find_by_id(po_id)
                        .filter(purchase_order::Column::BusinessId.eq(ctx.business_id))
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound("Purchase order".to_string())
                        })?;

                    let status = order.status().ok_or_else(|| {
                        ServiceError::ValidationError(format!(
                            "unknown purchase order status '{}'",
                            order.status
                        ))
                    })?;
                    if !status.receivable() {
                        return Err(ServiceError::ValidationError(format!(
                            "purchase order in status '{}' cannot be received",
                            status.as_str()
                        )));
                    }

                    let ordered = purchase_order_item::Entity::find()
                        .filter(purchase_order_item::Column::PurchaseOrderId.eq(order.id))
                        .all(txn)
                        .await?;

                    for line in &lines {
                        if !ordered.iter().any(|o| o.item_id == line.item_id) {
                            return Err(ServiceError::ValidationError(
                                "received item is not on this purchase order".to_string(),
                            ));
                        }

                        InventoryLedger::adjust(
                            txn,
                            ctx.business_id,
                            line.item_id,
                            line.quantity,
                        )
                        .await?;

                        inventory_transaction::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            business_id: Set(ctx.business_id),
                            item_id: Set(line.item_id),
                            quantity: Set(line.quantity),
                            r#type: Set(MovementType::Receive.as_str().to_string()),
                            notes: Set(Some(format!("Received from PO: {}", order.po_number))),
                            user_id: Set(ctx.user_id),
                            purchase_order_id: Set(Some(order.id)),
                            created_at: Set(Utc::now()),
                        }
                        .insert(txn)
                        .await?;
                    }

                    // Cumulative receipt totals across all receipts of this
                    // order, including the rows just inserted.
                    let movements = inventory_transaction::Entity::find()
                        .filter(inventory_transaction::Column::PurchaseOrderId.eq(order.id))
                        .all(txn)
                        .await?;
                    let mut received_totals: HashMap<Uuid, i64> = HashMap::new();
                    for movement in &movements {
                        *received_totals.entry(movement.item_id).or_default() +=
                            i64::from(movement.quantity);
                    }

                    let fully_received = ordered.iter().all(|line| {
                        received_totals.get(&line.item_id).copied().unwrap_or(0)
                            >= i64::from(line.quantity)
                    });
                    let new_status = if fully_received {
                        PurchaseOrderStatus::Received
                    } else {
                        PurchaseOrderStatus::Partial
                    };

                    let mut active: purchase_order::ActiveModel = order.clone().into();
                    active.status = Set(new_status.as_str().to_string());
                    active.updated_at = Set(Utc::now());
                    active.update(txn).await?;

                    AuditRecorder::record(
                        txn,
                        &ctx,
                        &meta,
                        AuditAction::Received,
                        AuditTarget::PurchaseOrder,
                        order.id,
                        Some(json!({
                            "items": lines
                                .iter()
                                .map(|l| json!({"itemId": l.item_id, "quantity": l.quantity}))
                                .collect::<Vec<_>>(),
                            "status": new_status.as_str(),
                        })),
                    )
                    .await?;

                    info!(
                        po_number = %order.po_number,
                        status = new_status.as_str(),
                        "purchase order receipt recorded"
                    );
                    Ok(new_status)
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    /// Manual status update for the `sent` / `cancelled` legs of the
    /// lifecycle. `partial` and `received` are reachable only through
    /// [`Self::receive`]; `cancelled` is terminal.
    #[instrument(skip(self, meta), fields(po_id = %po_id))]
    pub async fn set_status(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        po_id: Uuid,
        new_status: PurchaseOrderStatus,
    ) -> Result<purchase_order::Model, ServiceError> {
        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, purchase_order::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let order = purchase_order::Entity::find_by_id(po_id)
                        .filter(purchase_order::Column::BusinessId.eq(ctx.business_id))
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound("Purchase order".to_string())
                        })?;

                    let current = order.status().ok_or_else(|| {
                        ServiceError::ValidationError(format!(
                            "unknown purchase order status '{}'",
                            order.status
                        ))
                    })?;
                    if !current.can_set_manually(new_status) {
                        return Err(ServiceError::ValidationError(format!(
                            "cannot move purchase order from '{}' to '{}'",
                            current.as_str(),
                            new_status.as_str()
                        )));
                    }

                    let previous = order.status.clone();
                    let mut active: purchase_order::ActiveModel = order.into();
                    active.status = Set(new_status.as_str().to_string());
                    active.updated_at = Set(Utc::now());
                    let updated = active.update(txn).await?;

                    AuditRecorder::record(
                        txn,
                        &ctx,
                        &meta,
                        AuditAction::Updated,
                        AuditTarget::PurchaseOrder,
                        updated.id,
                        Some(json!({
                            "status": new_status.as_str(),
                            "previousStatus": previous,
                        })),
                    )
                    .await?;

                    Ok(updated)
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    /// One order with its lines, tenant-scoped.
    pub async fn get(
        &self,
        ctx: &AuthContext,
        po_id: Uuid,
    ) -> Result<(purchase_order::Model, Vec<purchase_order_item::Model>), ServiceError> {
        let order = purchase_order::Entity::find_by_id(po_id)
            .filter(purchase_order::Column::BusinessId.eq(ctx.business_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Purchase order".to_string()))?;

        let lines = purchase_order_item::Entity::find()
            .filter(purchase_order_item::Column::PurchaseOrderId.eq(order.id))
            .all(self.db.as_ref())
            .await?;

        Ok((order, lines))
    }

    /// Paginated listing, newest first, optionally filtered by status.
    pub async fn list(
        &self,
        ctx: &AuthContext,
        status: Option<PurchaseOrderStatus>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<purchase_order::Model>, Pagination), ServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let mut select = purchase_order::Entity::find()
            .filter(purchase_order::Column::BusinessId.eq(ctx.business_id));
        if let Some(status) = status {
            select = select.filter(purchase_order::Column::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(purchase_order::Column::CreatedAt)
            .paginate(self.db.as_ref(), limit);
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page - 1).await?;

        Ok((orders, Pagination::new(total, page, limit)))
    }
}
