//! Stock movements: each receive/deploy is one atomic unit of
//! ledger adjust + movement row + audit entry.
//!
//! These operations are intentionally not idempotent: every call is a
//! distinct physical movement, and there is no dedup token. Callers must
//! not re-submit a confirmed request.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::db::DbPool;
use crate::entities::inventory_transaction::{self, MovementType};
use crate::errors::{from_transaction_error, ServiceError};
use crate::services::audit::{AuditAction, AuditRecorder, AuditTarget};
use crate::services::ledger::InventoryLedger;

#[derive(Debug, Clone)]
pub struct MovementRequest {
    pub item_id: Uuid,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct StockMovementService {
    db: Arc<DbPool>,
}

impl StockMovementService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Adds stock to an item and records a `receive` movement.
    #[instrument(skip(self, meta), fields(item_id = %req.item_id, quantity = req.quantity))]
    pub async fn receive(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        req: MovementRequest,
    ) -> Result<inventory_transaction::Model, ServiceError> {
        self.apply(ctx, meta, req, MovementType::Receive).await
    }

    /// Removes stock from an item and records a `deploy` movement. Fails
    /// with `InsufficientStock` when the item holds less than requested,
    /// leaving the quantity unchanged.
    #[instrument(skip(self, meta), fields(item_id = %req.item_id, quantity = req.quantity))]
    pub async fn deploy(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        req: MovementRequest,
    ) -> Result<inventory_transaction::Model, ServiceError> {
        self.apply(ctx, meta, req, MovementType::Deploy).await
    }

    async fn apply(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        req: MovementRequest,
        movement: MovementType,
    ) -> Result<inventory_transaction::Model, ServiceError> {
        if req.quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "quantity must be positive".to_string(),
            ));
        }

        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, inventory_transaction::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let delta = movement.sign() * req.quantity;
                    let new_quantity =
                        InventoryLedger::adjust(txn, ctx.business_id, req.item_id, delta).await?;

                    let movement_row = inventory_transaction::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        business_id: Set(ctx.business_id),
                        item_id: Set(req.item_id),
                        quantity: Set(req.quantity),
                        r#type: Set(movement.as_str().to_string()),
                        notes: Set(req.notes.clone()),
                        user_id: Set(ctx.user_id),
                        purchase_order_id: Set(None),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;

                    let action = match movement {
                        MovementType::Receive => AuditAction::Received,
                        MovementType::Deploy => AuditAction::Deployed,
                        MovementType::Adjustment => AuditAction::Updated,
                    };
                    AuditRecorder::record(
                        txn,
                        &ctx,
                        &meta,
                        action,
                        AuditTarget::Inventory,
                        req.item_id,
                        Some(json!({
                            "quantity": req.quantity,
                            "notes": req.notes,
                            "transactionId": movement_row.id,
                            "newQuantity": new_quantity,
                        })),
                    )
                    .await?;

                    info!(
                        item_id = %req.item_id,
                        movement = movement.as_str(),
                        quantity = req.quantity,
                        new_quantity,
                        "stock movement recorded"
                    );

                    Ok(movement_row)
                })
            })
            .await
            .map_err(from_transaction_error)
    }
}
