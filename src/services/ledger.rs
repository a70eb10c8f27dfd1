//! Inventory ledger: the only writer of `inventory_items.quantity`.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::inventory_item;
use crate::errors::ServiceError;

pub struct InventoryLedger;

impl InventoryLedger {
    /// Applies a signed quantity delta to one item.
    ///
    /// Must be called inside an open transaction: the caller is responsible
    /// for recording the matching movement row and audit entry in the same
    /// transaction, so a failure anywhere rolls back all three.
    ///
    /// The adjustment is a single conditional UPDATE guarded by
    /// `quantity + delta >= 0`, so concurrent adjusts on the same item
    /// cannot interleave a lost update or drive the quantity negative.
    pub async fn adjust<C: ConnectionTrait>(
        conn: &C,
        business_id: Uuid,
        item_id: Uuid,
        delta: i32,
    ) -> Result<i32, ServiceError> {
        // Tenant-scoped existence check: a foreign-tenant item reports the
        // same "not found" as a missing one.
        inventory_item::Entity::find_by_id(item_id)
            .filter(inventory_item::Column::BusinessId.eq(business_id))
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item".to_string()))?;

        let result = inventory_item::Entity::update_many()
            .col_expr(
                inventory_item::Column::Quantity,
                Expr::col(inventory_item::Column::Quantity).add(delta),
            )
            .col_expr(
                inventory_item::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(inventory_item::Column::Id.eq(item_id))
            .filter(inventory_item::Column::BusinessId.eq(business_id))
            .filter(Expr::expr(Expr::col(inventory_item::Column::Quantity).add(delta)).gte(0))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::InsufficientStock);
        }

        // Re-read inside the same transaction; the row is locked by the
        // update above, so this is the value that will commit.
        let updated = inventory_item::Entity::find_by_id(item_id)
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item".to_string()))?;

        Ok(updated.quantity)
    }
}
