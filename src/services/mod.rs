//! Service layer: one service per area, all tenant-scoped.
//!
//! Services own the transactional core. Handlers stay thin: they extract
//! the caller context, delegate here, and serialize the result.

pub mod audit;
pub mod business;
pub mod inventory;
pub mod ledger;
pub mod purchase_orders;
pub mod stock_movements;

use std::sync::Arc;

use serde::Serialize;

use crate::db::DbPool;

/// Bundle of all services, shared through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub inventory: inventory::InventoryService,
    pub stock_movements: stock_movements::StockMovementService,
    pub purchase_orders: purchase_orders::PurchaseOrderService,
    pub audit: audit::AuditLogService,
    pub business: business::BusinessService,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            inventory: inventory::InventoryService::new(db.clone()),
            stock_movements: stock_movements::StockMovementService::new(db.clone()),
            purchase_orders: purchase_orders::PurchaseOrderService::new(db.clone()),
            audit: audit::AuditLogService::new(db.clone()),
            business: business::BusinessService::new(db),
        }
    }
}

/// Pagination envelope for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub pages: u64,
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            total,
            pages,
            page,
            limit,
        }
    }
}
