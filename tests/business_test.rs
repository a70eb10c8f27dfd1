mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use stockroom_api::entities::category;
use stockroom_api::errors::ServiceError;
use stockroom_api::services::business::{SettingsUpdate, SetupBusiness};

use common::{admin_ctx, meta, spawn_app, staff_ctx};

fn setup_input(name: &str) -> SetupBusiness {
    SetupBusiness {
        name: name.to_string(),
        business_type: Some("retail".to_string()),
        address: None,
        currency: "USD".to_string(),
        tax_rate: dec!(8),
        fiscal_year_start: None,
    }
}

#[tokio::test]
async fn setup_creates_settings_and_starter_categories() {
    let app = spawn_app().await;

    let (biz, settings) = app
        .services()
        .business
        .setup(setup_input("Acme"))
        .await
        .unwrap();

    assert_eq!(biz.name, "Acme");
    assert_eq!(biz.tax_rate, dec!(8));
    assert_eq!(settings.business_id, biz.id);
    assert!(settings.low_stock_alerts);
    assert!(settings.auto_order_suggestions);
    assert_eq!(settings.low_stock_threshold, 10);

    let categories = category::Entity::find()
        .filter(category::Column::BusinessId.eq(biz.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    let mut names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        ["Electronics", "Furniture", "Office Supplies", "Packaging"]
    );
}

#[tokio::test]
async fn setup_validates_input() {
    let app = spawn_app().await;

    let err = app
        .services()
        .business
        .setup(SetupBusiness {
            name: "  ".to_string(),
            ..setup_input("x")
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .services()
        .business
        .setup(SetupBusiness {
            tax_rate: dec!(-1),
            ..setup_input("Acme")
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn update_settings_is_admin_only_and_partial() {
    let app = spawn_app().await;
    let (biz, _) = app
        .services()
        .business
        .setup(setup_input("Acme"))
        .await
        .unwrap();

    let err = app
        .services()
        .business
        .update_settings(
            &staff_ctx(biz.id),
            &meta(),
            SettingsUpdate {
                low_stock_threshold: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Forbidden(_));

    let ctx = admin_ctx(biz.id);
    let (updated_biz, updated_settings) = app
        .services()
        .business
        .update_settings(
            &ctx,
            &meta(),
            SettingsUpdate {
                low_stock_threshold: Some(5),
                tax_rate: Some(dec!(10)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Touched fields change, everything else stays.
    assert_eq!(updated_settings.low_stock_threshold, 5);
    assert_eq!(updated_biz.tax_rate, dec!(10));
    assert_eq!(updated_biz.name, "Acme");
    assert!(updated_settings.low_stock_alerts);

    let (fetched_biz, fetched_settings) =
        app.services().business.get_settings(&ctx).await.unwrap();
    assert_eq!(fetched_biz.tax_rate, dec!(10));
    assert_eq!(fetched_settings.low_stock_threshold, 5);
}

#[tokio::test]
async fn update_settings_writes_audit_entry() {
    let app = spawn_app().await;
    let (biz, _) = app
        .services()
        .business
        .setup(setup_input("Acme"))
        .await
        .unwrap();
    let ctx = admin_ctx(biz.id);

    app.services()
        .business
        .update_settings(
            &ctx,
            &meta(),
            SettingsUpdate {
                name: Some("Acme Ltd".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    use stockroom_api::entities::audit_log;
    let entries = audit_log::Entity::find()
        .filter(audit_log::Column::BusinessId.eq(biz.id))
        .filter(audit_log::Column::ItemType.eq("business"))
        .count(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(entries, 1);
}
