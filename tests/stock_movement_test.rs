mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};

use stockroom_api::entities::{audit_log, inventory_item, inventory_transaction};
use stockroom_api::errors::ServiceError;
use stockroom_api::services::ledger::InventoryLedger;
use stockroom_api::services::stock_movements::MovementRequest;

use common::{admin_ctx, meta, seed_business, seed_item, spawn_app, staff_ctx};

async fn quantity_of(app: &common::TestApp, item_id: uuid::Uuid) -> i32 {
    inventory_item::Entity::find_by_id(item_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap()
        .quantity
}

#[tokio::test]
async fn receive_and_deploy_update_quantity() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "PAP-001", 100).await;

    let svc = &app.services().stock_movements;

    let tx = svc
        .deploy(
            &ctx,
            &meta(),
            MovementRequest {
                item_id: item.id,
                quantity: 15,
                notes: Some("office restock".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(tx.r#type, "deploy");
    assert_eq!(tx.quantity, 15);
    assert_eq!(quantity_of(&app, item.id).await, 85);

    svc.receive(
        &ctx,
        &meta(),
        MovementRequest {
            item_id: item.id,
            quantity: 24,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(quantity_of(&app, item.id).await, 109);
}

#[tokio::test]
async fn overdraw_fails_without_side_effects() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "PAP-001", 109).await;

    let err = app
        .services()
        .stock_movements
        .deploy(
            &ctx,
            &meta(),
            MovementRequest {
                item_id: item.id,
                quantity: 200,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock);

    // Quantity untouched and no movement or audit row survived the rollback.
    assert_eq!(quantity_of(&app, item.id).await, 109);
    let movements = inventory_transaction::Entity::find()
        .filter(inventory_transaction::Column::ItemId.eq(item.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert!(movements.is_empty());
    let audits = audit_log::Entity::find()
        .filter(audit_log::Column::BusinessId.eq(biz.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert!(audits.is_empty());
}

#[tokio::test]
async fn repeated_deploys_stop_exactly_at_zero() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "WID-001", 10).await;

    let mut ok = 0;
    let mut rejected = 0;
    for _ in 0..20 {
        let result = app
            .services()
            .stock_movements
            .deploy(
                &ctx,
                &meta(),
                MovementRequest {
                    item_id: item.id,
                    quantity: 1,
                    notes: None,
                },
            )
            .await;
        match result {
            Ok(_) => ok += 1,
            Err(ServiceError::InsufficientStock) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(ok, 10);
    assert_eq!(rejected, 10);
    assert_eq!(quantity_of(&app, item.id).await, 0);
}

#[tokio::test]
async fn ledger_sum_matches_stored_quantity() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "SUM-001", 0).await;

    let svc = &app.services().stock_movements;
    for (movement, qty) in [("receive", 40), ("deploy", 12), ("receive", 5), ("deploy", 3)] {
        let req = MovementRequest {
            item_id: item.id,
            quantity: qty,
            notes: None,
        };
        if movement == "receive" {
            svc.receive(&ctx, &meta(), req).await.unwrap();
        } else {
            svc.deploy(&ctx, &meta(), req).await.unwrap();
        }
    }

    let movements = inventory_transaction::Entity::find()
        .filter(inventory_transaction::Column::ItemId.eq(item.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    let sum: i32 = movements.iter().map(|m| m.signed_quantity()).sum();
    assert_eq!(sum, 30);
    assert_eq!(quantity_of(&app, item.id).await, 30);
}

#[tokio::test]
async fn failed_transaction_rolls_back_ledger_adjust() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let item = seed_item(app.db.as_ref(), biz.id, "ROLL-001", 50).await;

    let business_id = biz.id;
    let item_id = item.id;
    let result = app
        .db
        .transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                InventoryLedger::adjust(txn, business_id, item_id, -20).await?;
                Err(ServiceError::ValidationError("boom".to_string()))
            })
        })
        .await;
    assert!(result.is_err());

    assert_eq!(quantity_of(&app, item.id).await, 50);
}

#[tokio::test]
async fn nonpositive_quantity_is_rejected() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = admin_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "VAL-001", 5).await;

    for qty in [0, -4] {
        let err = app
            .services()
            .stock_movements
            .receive(
                &ctx,
                &meta(),
                MovementRequest {
                    item_id: item.id,
                    quantity: qty,
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
    }
    assert_eq!(quantity_of(&app, item.id).await, 5);
}

#[tokio::test]
async fn movement_writes_audit_entry() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);
    let item = seed_item(app.db.as_ref(), biz.id, "AUD-001", 10).await;

    app.services()
        .stock_movements
        .receive(
            &ctx,
            &meta(),
            MovementRequest {
                item_id: item.id,
                quantity: 7,
                notes: Some("weekly delivery".to_string()),
            },
        )
        .await
        .unwrap();

    let audits = audit_log::Entity::find()
        .filter(audit_log::Column::BusinessId.eq(biz.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(audits.len(), 1);
    let entry = &audits[0];
    assert_eq!(entry.action, "received");
    assert_eq!(entry.item_type, "inventory");
    assert_eq!(entry.item_id, item.id);
    assert_eq!(entry.user_id, ctx.user_id);
    assert_eq!(entry.ip_address.as_deref(), Some("127.0.0.1"));
    let details: serde_json::Value =
        serde_json::from_str(entry.details.as_deref().unwrap()).unwrap();
    assert_eq!(details["quantity"], 7);
    assert_eq!(details["newQuantity"], 17);
}
