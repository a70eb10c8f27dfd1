mod common;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use stockroom_api::services::audit::AuditQuery;
use stockroom_api::services::inventory::NewInventoryItem;
use stockroom_api::services::stock_movements::MovementRequest;

use common::{meta, seed_business, spawn_app, staff_ctx};

fn new_item(sku: &str, quantity: i32) -> NewInventoryItem {
    NewInventoryItem {
        name: format!("Item {sku}"),
        sku: sku.to_string(),
        description: None,
        quantity,
        min_quantity: 0,
        cost_price: None,
        selling_price: None,
        location: None,
        category_id: None,
        supplier_id: None,
    }
}

#[tokio::test]
async fn filters_by_action_and_target() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);

    let item = app
        .services()
        .inventory
        .create_item(&ctx, &meta(), new_item("PAP-001", 50))
        .await
        .unwrap();
    app.services()
        .stock_movements
        .deploy(
            &ctx,
            &meta(),
            MovementRequest {
                item_id: item.id,
                quantity: 5,
                notes: None,
            },
        )
        .await
        .unwrap();

    let (all, pagination) = app
        .services()
        .audit
        .list(&ctx, AuditQuery::default(), 1, 50)
        .await
        .unwrap();
    assert_eq!(pagination.total, 2);
    // Newest first.
    assert_eq!(all[0].action, "deployed");
    assert_eq!(all[1].action, "created");

    let (created_only, _) = app
        .services()
        .audit
        .list(
            &ctx,
            AuditQuery {
                action: Some("created".to_string()),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(created_only.len(), 1);
    assert_eq!(created_only[0].item_id, item.id);

    let (inventory_only, _) = app
        .services()
        .audit
        .list(
            &ctx,
            AuditQuery {
                item_type: Some("inventory".to_string()),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(inventory_only.len(), 2);
}

#[tokio::test]
async fn date_range_and_search_filters() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);

    app.services()
        .inventory
        .create_item(&ctx, &meta(), new_item("PAP-001", 0))
        .await
        .unwrap();

    // A window containing now matches; a window ending yesterday does not.
    let (hits, _) = app
        .services()
        .audit
        .list(
            &ctx,
            AuditQuery {
                start_date: Some(Utc::now() - Duration::hours(1)),
                end_date: Some(Utc::now() + Duration::hours(1)),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);

    let (misses, _) = app
        .services()
        .audit
        .list(
            &ctx,
            AuditQuery {
                end_date: Some(Utc::now() - Duration::days(1)),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert!(misses.is_empty());

    // Free-text search runs over the serialized details payload.
    let (found, _) = app
        .services()
        .audit
        .list(
            &ctx,
            AuditQuery {
                search: Some("PAP-001".to_string()),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let (not_found, _) = app
        .services()
        .audit
        .list(
            &ctx,
            AuditQuery {
                search: Some("no-such-sku".to_string()),
                ..Default::default()
            },
            1,
            50,
        )
        .await
        .unwrap();
    assert!(not_found.is_empty());
}

#[tokio::test]
async fn pagination_pages_through_entries() {
    let app = spawn_app().await;
    let biz = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let ctx = staff_ctx(biz.id);

    for i in 0..5 {
        app.services()
            .inventory
            .create_item(&ctx, &meta(), new_item(&format!("SKU-{i:03}"), 0))
            .await
            .unwrap();
    }

    let (page1, pagination) = app
        .services()
        .audit
        .list(&ctx, AuditQuery::default(), 1, 2)
        .await
        .unwrap();
    assert_eq!(page1.len(), 2);
    assert_eq!(pagination.total, 5);
    assert_eq!(pagination.pages, 3);

    let (page3, _) = app
        .services()
        .audit
        .list(&ctx, AuditQuery::default(), 3, 2)
        .await
        .unwrap();
    assert_eq!(page3.len(), 1);
}

#[tokio::test]
async fn audit_trail_is_tenant_scoped() {
    let app = spawn_app().await;
    let acme = seed_business(app.db.as_ref(), "Acme", dec!(0)).await;
    let rival = seed_business(app.db.as_ref(), "Rival", dec!(0)).await;

    app.services()
        .inventory
        .create_item(&staff_ctx(acme.id), &meta(), new_item("ACM-001", 0))
        .await
        .unwrap();
    app.services()
        .inventory
        .create_item(&staff_ctx(rival.id), &meta(), new_item("RIV-001", 0))
        .await
        .unwrap();

    let (logs, pagination) = app
        .services()
        .audit
        .list(&staff_ctx(acme.id), AuditQuery::default(), 1, 50)
        .await
        .unwrap();
    assert_eq!(pagination.total, 1);
    assert!(logs.iter().all(|l| l.business_id == acme.id));
}
