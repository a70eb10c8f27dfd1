//! Tenant lifecycle: onboarding, settings, and the whole-tenant purge.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::{AuthContext, RequestMeta};
use crate::db::DbPool;
use crate::entities::{
    audit_log, business, business_settings, category, device, inventory_item,
    inventory_transaction, invoice, invoice_item, purchase_order, purchase_order_counter,
    purchase_order_item, supplier,
};
use crate::errors::{from_transaction_error, ServiceError};
use crate::services::audit::{AuditAction, AuditRecorder, AuditTarget};

const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;
const DEFAULT_CATEGORIES: [&str; 4] = [
    "Office Supplies",
    "Electronics",
    "Packaging",
    "Furniture",
];

#[derive(Debug, Clone)]
pub struct SetupBusiness {
    pub name: String,
    pub business_type: Option<String>,
    pub address: Option<String>,
    pub currency: String,
    pub tax_rate: Decimal,
    pub fiscal_year_start: Option<String>,
}

/// Partial update of the business profile and its settings row.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub name: Option<String>,
    pub business_type: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub currency: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub fiscal_year_start: Option<Option<String>>,
    pub low_stock_alerts: Option<bool>,
    pub auto_order_suggestions: Option<bool>,
    pub low_stock_threshold: Option<i32>,
}

#[derive(Clone)]
pub struct BusinessService {
    db: Arc<DbPool>,
}

impl BusinessService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Onboarding: creates the business, its settings row with defaults,
    /// and a starter set of categories in one transaction. Runs before
    /// any caller context exists.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn setup(
        &self,
        input: SetupBusiness,
    ) -> Result<(business::Model, business_settings::Model), ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "business name is required".to_string(),
            ));
        }
        if input.tax_rate < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "tax rate cannot be negative".to_string(),
            ));
        }

        self.db
            .transaction::<_, (business::Model, business_settings::Model), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        let now = Utc::now();
                        let biz = business::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            name: Set(input.name.clone()),
                            business_type: Set(input.business_type.clone()),
                            address: Set(input.address.clone()),
                            currency: Set(input.currency.clone()),
                            tax_rate: Set(input.tax_rate),
                            fiscal_year_start: Set(input.fiscal_year_start.clone()),
                            created_at: Set(now),
                            updated_at: Set(now),
                        }
                        .insert(txn)
                        .await?;

                        let settings = business_settings::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            business_id: Set(biz.id),
                            low_stock_alerts: Set(true),
                            auto_order_suggestions: Set(true),
                            low_stock_threshold: Set(DEFAULT_LOW_STOCK_THRESHOLD),
                            created_at: Set(now),
                            updated_at: Set(now),
                        }
                        .insert(txn)
                        .await?;

                        for name in DEFAULT_CATEGORIES {
                            category::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                name: Set(name.to_string()),
                                business_id: Set(biz.id),
                                created_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                        }

                        info!(business_id = %biz.id, "business onboarded");
                        Ok((biz, settings))
                    })
                },
            )
            .await
            .map_err(from_transaction_error)
    }

    /// The caller's business profile and settings.
    pub async fn get_settings(
        &self,
        ctx: &AuthContext,
    ) -> Result<(business::Model, business_settings::Model), ServiceError> {
        let biz = business::Entity::find_by_id(ctx.business_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Business".to_string()))?;

        let settings = business_settings::Entity::find()
            .filter(business_settings::Column::BusinessId.eq(ctx.business_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Business settings".to_string()))?;

        Ok((biz, settings))
    }

    /// Admin-only partial update of the business profile and settings.
    #[instrument(skip(self, meta, update))]
    pub async fn update_settings(
        &self,
        ctx: &AuthContext,
        meta: &RequestMeta,
        update: SettingsUpdate,
    ) -> Result<(business::Model, business_settings::Model), ServiceError> {
        ctx.require_admin()?;

        if let Some(threshold) = update.low_stock_threshold {
            if threshold < 0 {
                return Err(ServiceError::ValidationError(
                    "low stock threshold cannot be negative".to_string(),
                ));
            }
        }
        if let Some(rate) = update.tax_rate {
            if rate < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "tax rate cannot be negative".to_string(),
                ));
            }
        }

        let (biz, settings) = self.get_settings(ctx).await?;
        let ctx = *ctx;
        let meta = meta.clone();

        self.db
            .transaction::<_, (business::Model, business_settings::Model), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        let now = Utc::now();

                        let mut biz_active: business::ActiveModel = biz.into();
                        if let Some(name) = update.name {
                            biz_active.name = Set(name);
                        }
                        if let Some(business_type) = update.business_type {
                            biz_active.business_type = Set(business_type);
                        }
                        if let Some(address) = update.address {
                            biz_active.address = Set(address);
                        }
                        if let Some(currency) = update.currency {
                            biz_active.currency = Set(currency);
                        }
                        if let Some(tax_rate) = update.tax_rate {
                            biz_active.tax_rate = Set(tax_rate);
                        }
                        if let Some(fiscal_year_start) = update.fiscal_year_start {
                            biz_active.fiscal_year_start = Set(fiscal_year_start);
                        }
                        biz_active.updated_at = Set(now);
                        let biz = biz_active.update(txn).await?;

                        let mut settings_active: business_settings::ActiveModel =
                            settings.into();
                        if let Some(low_stock_alerts) = update.low_stock_alerts {
                            settings_active.low_stock_alerts = Set(low_stock_alerts);
                        }
                        if let Some(auto_order_suggestions) = update.auto_order_suggestions {
                            settings_active.auto_order_suggestions =
                                Set(auto_order_suggestions);
                        }
                        if let Some(threshold) = update.low_stock_threshold {
                            settings_active.low_stock_threshold = Set(threshold);
                        }
                        settings_active.updated_at = Set(now);
                        let settings = settings_active.update(txn).await?;

                        AuditRecorder::record(
                            txn,
                            &ctx,
                            &meta,
                            AuditAction::Updated,
                            AuditTarget::Business,
                            biz.id,
                            Some(json!({
                                "name": biz.name,
                                "lowStockThreshold": settings.low_stock_threshold,
                            })),
                        )
                        .await?;

                        Ok((biz, settings))
                    })
                },
            )
            .await
            .map_err(from_transaction_error)
    }

    /// Deletes every row owned by the caller's business, the business
    /// itself included. Admin-only; a mismatched id reports the same
    /// "not found" as a business that does not exist.
    ///
    /// Child tables go first so the deletes never trip a foreign key.
    #[instrument(skip(self))]
    pub async fn clear_business_data(
        &self,
        ctx: &AuthContext,
        business_id: Uuid,
    ) -> Result<(), ServiceError> {
        ctx.require_admin()?;
        if business_id != ctx.business_id {
            return Err(ServiceError::NotFound("Business".to_string()));
        }

        let ctx = *ctx;

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let bid = ctx.business_id;

                    audit_log::Entity::delete_many()
                        .filter(audit_log::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;

                    let invoice_ids: Vec<Uuid> = invoice::Entity::find()
                        .filter(invoice::Column::BusinessId.eq(bid))
                        .select_only()
                        .column(invoice::Column::Id)
                        .into_tuple()
                        .all(txn)
                        .await?;
                    if !invoice_ids.is_empty() {
                        invoice_item::Entity::delete_many()
                            .filter(invoice_item::Column::InvoiceId.is_in(invoice_ids))
                            .exec(txn)
                            .await?;
                    }
                    invoice::Entity::delete_many()
                        .filter(invoice::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;

                    let po_ids: Vec<Uuid> = purchase_order::Entity::find()
                        .filter(purchase_order::Column::BusinessId.eq(bid))
                        .select_only()
                        .column(purchase_order::Column::Id)
                        .into_tuple()
                        .all(txn)
                        .await?;
                    if !po_ids.is_empty() {
                        purchase_order_item::Entity::delete_many()
                            .filter(purchase_order_item::Column::PurchaseOrderId.is_in(po_ids))
                            .exec(txn)
                            .await?;
                    }
                    inventory_transaction::Entity::delete_many()
                        .filter(inventory_transaction::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    purchase_order::Entity::delete_many()
                        .filter(purchase_order::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    purchase_order_counter::Entity::delete_many()
                        .filter(purchase_order_counter::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;

                    device::Entity::delete_many()
                        .filter(device::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    inventory_item::Entity::delete_many()
                        .filter(inventory_item::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    supplier::Entity::delete_many()
                        .filter(supplier::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    category::Entity::delete_many()
                        .filter(category::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    business_settings::Entity::delete_many()
                        .filter(business_settings::Column::BusinessId.eq(bid))
                        .exec(txn)
                        .await?;
                    business::Entity::delete_by_id(bid).exec(txn).await?;

                    warn!(business_id = %bid, "business data cleared");
                    Ok(())
                })
            })
            .await
            .map_err(from_transaction_error)
    }
}
