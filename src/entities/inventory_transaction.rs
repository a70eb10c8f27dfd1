use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a stock movement. Stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Receive,
    Deploy,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Receive => "receive",
            MovementType::Deploy => "deploy",
            MovementType::Adjustment => "adjustment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "receive" => Some(MovementType::Receive),
            "deploy" => Some(MovementType::Deploy),
            "adjustment" => Some(MovementType::Adjustment),
            _ => None,
        }
    }

    /// Sign applied to the stored (positive) quantity when summing the
    /// ledger. Receipts add stock, deployments remove it.
    pub fn sign(&self) -> i32 {
        match self {
            MovementType::Receive | MovementType::Adjustment => 1,
            MovementType::Deploy => -1,
        }
    }
}

/// Immutable record of one ledger adjustment. Rows are append-only: never
/// updated, never deleted except by the whole-tenant purge.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub item_id: Uuid,
    /// Always stored positive; `type` carries the direction.
    pub quantity: i32,
    pub r#type: String,
    pub notes: Option<String>,
    pub user_id: Uuid,
    pub purchase_order_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Model {
    pub fn movement_type(&self) -> Option<MovementType> {
        MovementType::from_str(&self.r#type)
    }

    /// Signed contribution of this row to the item's on-hand quantity.
    pub fn signed_quantity(&self) -> i32 {
        self.movement_type()
            .map(|t| t.sign() * self.quantity)
            .unwrap_or(0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_round_trip() {
        for t in [
            MovementType::Receive,
            MovementType::Deploy,
            MovementType::Adjustment,
        ] {
            assert_eq!(MovementType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(MovementType::from_str("transfer"), None);
    }

    #[test]
    fn deploy_counts_negative() {
        let row = Model {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            quantity: 15,
            r#type: "deploy".into(),
            notes: None,
            user_id: Uuid::new_v4(),
            purchase_order_id: None,
            created_at: Utc::now(),
        };
        assert_eq!(row.signed_quantity(), -15);
    }
}
