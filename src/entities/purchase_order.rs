use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Purchase order lifecycle. `Partial` and `Received` are reachable only
/// through the receipt workflow; `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Draft,
    Sent,
    Partial,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "draft",
            PurchaseOrderStatus::Sent => "sent",
            PurchaseOrderStatus::Partial => "partial",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PurchaseOrderStatus::Draft),
            "sent" => Some(PurchaseOrderStatus::Sent),
            "partial" => Some(PurchaseOrderStatus::Partial),
            "received" => Some(PurchaseOrderStatus::Received),
            "cancelled" => Some(PurchaseOrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a plain status update (outside the receipt workflow) may move
    /// an order from `self` to `next`. Receipt-only states and transitions
    /// out of terminal states are rejected.
    pub fn can_set_manually(&self, next: PurchaseOrderStatus) -> bool {
        use PurchaseOrderStatus::*;
        match (self, next) {
            (Draft, Sent) => true,
            (Draft, Cancelled) | (Sent, Cancelled) => true,
            _ => false,
        }
    }

    /// Whether the receipt workflow may act on an order in this state.
    pub fn receivable(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Draft | PurchaseOrderStatus::Sent | PurchaseOrderStatus::Partial
        )
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable, tenant-scoped sequential: `PO-<year>-<3-digit-seq>`.
    pub po_number: String,
    pub supplier_id: Uuid,
    pub date: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub payment_terms: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub business_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn status(&self) -> Option<PurchaseOrderStatus> {
        PurchaseOrderStatus::from_str(&self.status)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_item::Entity")]
    Items,
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::PurchaseOrderStatus::*;

    #[test]
    fn manual_transitions() {
        assert!(Draft.can_set_manually(Sent));
        assert!(Draft.can_set_manually(Cancelled));
        assert!(Sent.can_set_manually(Cancelled));
        // receipt-only states are unreachable by hand
        assert!(!Sent.can_set_manually(Partial));
        assert!(!Sent.can_set_manually(Received));
        // cancelled is terminal
        assert!(!Cancelled.can_set_manually(Sent));
        assert!(!Cancelled.can_set_manually(Draft));
    }

    #[test]
    fn receivable_states() {
        assert!(Draft.receivable());
        assert!(Sent.receivable());
        assert!(Partial.receivable());
        assert!(!Received.receivable());
        assert!(!Cancelled.receivable());
    }
}
