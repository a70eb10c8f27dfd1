mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use stockroom_api::entities::{audit_log, inventory_item, inventory_transaction};
use stockroom_api::errors::ServiceError;
use stockroom_api::services::inventory::{ItemFilter, ItemUpdate, NewInventoryItem};

use common::{admin_ctx, meta, seed_business, seed_item, spawn_app, staff_ctx};

fn new_item(name: &str, sku: &str, quantity: i32) -> NewInventoryItem {
    NewInventoryItem {
        name: name.to_string(),
        sku: sku.to_string(),
        description: None,
        quantity,
        min_quantity: 0,
        cost_price: Some(dec!(3.50)),
        selling_price: Some(dec!(7.00)),
        location: None,
        category_id: None,
        supplier_id: None,
    }
}

#[tokio::test]
async fn create_seeds_ledger_for_initial_quantity() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);

    let item = app
        .services()
        .inventory
        .create_item(&ctx, &meta(), new_item("Copy paper", "PAP-001", 100))
        .await
        .unwrap();
    assert_eq!(item.quantity, 100);

    let movements = inventory_transaction::Entity::find()
        .filter(inventory_transaction::Column::ItemId.eq(item.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].r#type, "adjustment");
    assert_eq!(movements[0].quantity, 100);
    let sum: i32 = movements.iter().map(|m| m.signed_quantity()).sum();
    assert_eq!(sum, item.quantity);

    // Zero opening stock gets no movement row.
    let empty = app
        .services()
        .inventory
        .create_item(&ctx, &meta(), new_item("Staples", "STA-001", 0))
        .await
        .unwrap();
    let movements = inventory_transaction::Entity::find()
        .filter(inventory_transaction::Column::ItemId.eq(empty.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert!(movements.is_empty());
}

#[tokio::test]
async fn duplicate_sku_conflicts_within_tenant_only() {
    let app = spawn_app().await;
    let acme = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let rival = seed_business(app.db.as_ref(), "Rival", dec!(0)).await;

    app.services()
        .inventory
        .create_item(&staff_ctx(acme.id), &meta(), new_item("Paper", "PAP-001", 0))
        .await
        .unwrap();

    let err = app
        .services()
        .inventory
        .create_item(&staff_ctx(acme.id), &meta(), new_item("Paper 2", "PAP-001", 0))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    // Same SKU in a different tenant is fine.
    app.services()
        .inventory
        .create_item(&staff_ctx(rival.id), &meta(), new_item("Paper", "PAP-001", 0))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_changes_fields_but_never_quantity() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "PAP-001", 42).await;

    let updated = app
        .services()
        .inventory
        .update_item(
            &ctx,
            &meta(),
            item.id,
            ItemUpdate {
                name: Some("Premium paper".to_string()),
                min_quantity: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Premium paper");
    assert_eq!(updated.min_quantity, 5);
    assert_eq!(updated.quantity, 42);

    // SKU collision on update is a conflict.
    seed_item(app.db.as_ref(), biz.id, "PAP-002", 0).await;
    let err = app
        .services()
        .inventory
        .update_item(
            &ctx,
            &meta(),
            item.id,
            ItemUpdate {
                sku: Some("PAP-002".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn delete_keeps_movement_history() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);

    let item = app
        .services()
        .inventory
        .create_item(&ctx, &meta(), new_item("Paper", "PAP-001", 30))
        .await
        .unwrap();

    app.services()
        .inventory
        .delete_item(&ctx, &meta(), item.id)
        .await
        .unwrap();

    assert!(inventory_item::Entity::find_by_id(item.id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .is_none());

    // History survives; the audit entry carries the deleted row.
    let movements = inventory_transaction::Entity::find()
        .filter(inventory_transaction::Column::ItemId.eq(item.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);

    let deletion = audit_log::Entity::find()
        .filter(audit_log::Column::ItemId.eq(item.id))
        .filter(audit_log::Column::Action.eq("deleted"))
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    let snapshot: serde_json::Value =
        serde_json::from_str(deletion.details.as_deref().unwrap()).unwrap();
    assert_eq!(snapshot["sku"], "PAP-001");
    assert_eq!(snapshot["quantity"], 30);
}

#[tokio::test]
async fn get_item_returns_recent_history_newest_first() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "PAP-001", 100).await;

    use stockroom_api::services::stock_movements::MovementRequest;
    for qty in [1, 2, 3] {
        app.services()
            .stock_movements
            .deploy(
                &ctx,
                &meta(),
                MovementRequest {
                    item_id: item.id,
                    quantity: qty,
                    notes: None,
                },
            )
            .await
            .unwrap();
    }

    let (fetched, history) = app.services().inventory.get_item(&ctx, item.id).await.unwrap();
    assert_eq!(fetched.quantity, 94);
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn low_stock_filter_uses_business_threshold() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = admin_ctx(biz.id);

    // Threshold seeded at 10.
    seed_item(app.db.as_ref(), biz.id, "LOW-001", 3).await;
    seed_item(app.db.as_ref(), biz.id, "LOW-002", 10).await;
    seed_item(app.db.as_ref(), biz.id, "HIGH-001", 11).await;

    let (items, pagination) = app
        .services()
        .inventory
        .list_items(
            &ctx,
            ItemFilter {
                low_stock: true,
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(pagination.total, 2);
    assert!(items.iter().all(|i| i.quantity <= 10));
}

#[tokio::test]
async fn search_matches_name_or_sku() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);

    app.services()
        .inventory
        .create_item(&ctx, &meta(), new_item("Copy paper", "PAP-001", 0))
        .await
        .unwrap();
    app.services()
        .inventory
        .create_item(&ctx, &meta(), new_item("Stapler", "STA-001", 0))
        .await
        .unwrap();

    let (items, _) = app
        .services()
        .inventory
        .list_items(
            &ctx,
            ItemFilter {
                search: Some("paper".to_string()),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku, "PAP-001");

    let (items, _) = app
        .services()
        .inventory
        .list_items(
            &ctx,
            ItemFilter {
                search: Some("STA".to_string()),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku, "STA-001");
}
