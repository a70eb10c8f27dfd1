//! Shared test harness: a file-backed SQLite database with the real
//! migrations applied, plus seed helpers for tenants and catalog rows.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use tempfile::TempDir;
use uuid::Uuid;

use stockroom_api::auth::{AuthContext, RequestMeta, Role};
use stockroom_api::config::AppConfig;
use stockroom_api::db::{self, DbPool};
use stockroom_api::entities::{business, business_settings, inventory_item, supplier};
use stockroom_api::services::AppServices;
use stockroom_api::AppState;

pub struct TestApp {
    pub state: AppState,
    pub db: Arc<DbPool>,
    // Holds the SQLite file alive for the duration of the test.
    _tmp: TempDir,
}

impl TestApp {
    pub fn services(&self) -> &AppServices {
        &self.state.services
    }
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let db_path = tmp.path().join("test.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = db::establish_connection(&url).await.expect("connect");
    db::run_migrations(&pool).await.expect("migrate");

    let config = AppConfig::new(url, "127.0.0.1".to_string(), 0, "test".to_string());
    let state = AppState::new(Arc::new(pool), config);
    let db = state.db.clone();

    TestApp {
        state,
        db,
        _tmp: tmp,
    }
}

pub async fn seed_business(db: &DbPool, name: &str, tax_rate: Decimal) -> business::Model {
    let now = Utc::now();
    let biz = business::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        business_type: Set(None),
        address: Set(None),
        currency: Set("USD".to_string()),
        tax_rate: Set(tax_rate),
        fiscal_year_start: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert business");

    business_settings::ActiveModel {
        id: Set(Uuid::new_v4()),
        business_id: Set(biz.id),
        low_stock_alerts: Set(true),
        auto_order_suggestions: Set(true),
        low_stock_threshold: Set(10),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert settings");

    biz
}

pub async fn seed_supplier(db: &DbPool, business_id: Uuid, name: &str) -> supplier::Model {
    let now = Utc::now();
    supplier::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        business_id: Set(business_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert supplier")
}

/// Inserts an item directly, bypassing the service layer. Tests that
/// assert on movement history should create items through
/// `InventoryService::create_item` instead.
pub async fn seed_item(
    db: &DbPool,
    business_id: Uuid,
    sku: &str,
    quantity: i32,
) -> inventory_item::Model {
    let now = Utc::now();
    inventory_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Item {sku}")),
        sku: Set(sku.to_string()),
        description: Set(None),
        quantity: Set(quantity),
        min_quantity: Set(0),
        cost_price: Set(None),
        selling_price: Set(None),
        location: Set(None),
        category_id: Set(None),
        supplier_id: Set(None),
        business_id: Set(business_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert item")
}

pub fn admin_ctx(business_id: Uuid) -> AuthContext {
    AuthContext::new(Uuid::new_v4(), business_id, Role::Admin)
}

pub fn staff_ctx(business_id: Uuid) -> AuthContext {
    AuthContext::new(Uuid::new_v4(), business_id, Role::Staff)
}

pub fn meta() -> RequestMeta {
    RequestMeta {
        ip_address: Some("127.0.0.1".to_string()),
        device_info: Some("tests".to_string()),
    }
}
