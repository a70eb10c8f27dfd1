//! Embedded schema migrator.
//!
//! One migration per area, applied in dependency order. The schema matches
//! the entities in `crate::entities`.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_business_tables::Migration),
            Box::new(m20240101_000002_create_catalog_tables::Migration),
            Box::new(m20240101_000003_create_inventory_tables::Migration),
            Box::new(m20240101_000004_create_purchase_order_tables::Migration),
            Box::new(m20240101_000005_create_invoice_tables::Migration),
            Box::new(m20240101_000006_create_devices_table::Migration),
            Box::new(m20240101_000007_create_audit_logs_table::Migration),
        ]
    }
}

mod m20240101_000001_create_business_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_business_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Businesses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Businesses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Businesses::Name).string().not_null())
                        .col(ColumnDef::new(Businesses::BusinessType).string())
                        .col(ColumnDef::new(Businesses::Address).string())
                        .col(ColumnDef::new(Businesses::Currency).string().not_null())
                        .col(ColumnDef::new(Businesses::TaxRate).decimal().not_null())
                        .col(ColumnDef::new(Businesses::FiscalYearStart).string())
                        .col(
                            ColumnDef::new(Businesses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Businesses::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BusinessSettings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BusinessSettings::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessSettings::BusinessId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(BusinessSettings::LowStockAlerts)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessSettings::AutoOrderSuggestions)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessSettings::LowStockThreshold)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessSettings::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BusinessSettings::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_business_settings_business")
                                .from(BusinessSettings::Table, BusinessSettings::BusinessId)
                                .to(Businesses::Table, Businesses::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BusinessSettings::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Businesses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Businesses {
        Table,
        Id,
        Name,
        BusinessType,
        Address,
        Currency,
        TaxRate,
        FiscalYearStart,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum BusinessSettings {
        Table,
        Id,
        BusinessId,
        LowStockAlerts,
        AutoOrderSuggestions,
        LowStockThreshold,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .col(ColumnDef::new(Categories::BusinessId).uuid().not_null())
                        .col(
                            ColumnDef::new(Categories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::Email).string())
                        .col(ColumnDef::new(Suppliers::Phone).string())
                        .col(ColumnDef::new(Suppliers::Address).string())
                        .col(ColumnDef::new(Suppliers::BusinessId).uuid().not_null())
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Suppliers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Categories {
        Table,
        Id,
        Name,
        BusinessId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Suppliers {
        Table,
        Id,
        Name,
        Email,
        Phone,
        Address,
        BusinessId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_inventory_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                        .col(ColumnDef::new(InventoryItems::Sku).string().not_null())
                        .col(ColumnDef::new(InventoryItems::Description).string())
                        .col(
                            ColumnDef::new(InventoryItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::MinQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::CostPrice).decimal())
                        .col(ColumnDef::new(InventoryItems::SellingPrice).decimal())
                        .col(ColumnDef::new(InventoryItems::Location).string())
                        .col(ColumnDef::new(InventoryItems::CategoryId).uuid())
                        .col(ColumnDef::new(InventoryItems::SupplierId).uuid())
                        .col(ColumnDef::new(InventoryItems::BusinessId).uuid().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // SKU is unique within a business, not globally.
            manager
                .create_index(
                    Index::create()
                        .name("idx_inventory_items_business_sku")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::BusinessId)
                        .col(InventoryItems::Sku)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransactions::BusinessId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransactions::ItemId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransactions::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransactions::Type)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryTransactions::Notes).string())
                        .col(
                            ColumnDef::new(InventoryTransactions::UserId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryTransactions::PurchaseOrderId).uuid())
                        .col(
                            ColumnDef::new(InventoryTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        // No FK to inventory_items: movement history outlives
                        // a deleted item.
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_inventory_transactions_item")
                        .table(InventoryTransactions::Table)
                        .col(InventoryTransactions::ItemId)
                        .col(InventoryTransactions::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_inventory_transactions_po")
                        .table(InventoryTransactions::Table)
                        .col(InventoryTransactions::PurchaseOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryTransactions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InventoryItems {
        Table,
        Id,
        Name,
        Sku,
        Description,
        Quantity,
        MinQuantity,
        CostPrice,
        SellingPrice,
        Location,
        CategoryId,
        SupplierId,
        BusinessId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryTransactions {
        Table,
        Id,
        BusinessId,
        ItemId,
        Quantity,
        Type,
        Notes,
        UserId,
        PurchaseOrderId,
        CreatedAt,
    }
}

mod m20240101_000004_create_purchase_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_purchase_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::PoNumber).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::SupplierId).uuid().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::ExpectedDelivery)
                                .timestamp_with_time_zone(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::PaymentTerms).string())
                        .col(ColumnDef::new(PurchaseOrders::ShippingAddress).string())
                        .col(ColumnDef::new(PurchaseOrders::Notes).string())
                        .col(ColumnDef::new(PurchaseOrders::Status).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Subtotal).decimal().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Tax).decimal().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Total).decimal().not_null())
                        .col(ColumnDef::new(PurchaseOrders::BusinessId).uuid().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_purchase_orders_business_number")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::BusinessId)
                        .col(PurchaseOrders::PoNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::PurchaseOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::ItemId).uuid().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UnitPrice)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Total)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::Description).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_items_order")
                                .from(
                                    PurchaseOrderItems::Table,
                                    PurchaseOrderItems::PurchaseOrderId,
                                )
                                .to(PurchaseOrders::Table, PurchaseOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // Per-business, per-year sequence backing PO numbering.
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderCounters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderCounters::BusinessId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderCounters::Year)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderCounters::LastSeq)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(PurchaseOrderCounters::BusinessId)
                                .col(PurchaseOrderCounters::Year),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderCounters::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PurchaseOrders {
        Table,
        Id,
        PoNumber,
        SupplierId,
        Date,
        ExpectedDelivery,
        PaymentTerms,
        ShippingAddress,
        Notes,
        Status,
        Subtotal,
        Tax,
        Total,
        BusinessId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PurchaseOrderItems {
        Table,
        Id,
        PurchaseOrderId,
        ItemId,
        Quantity,
        UnitPrice,
        Total,
        Description,
    }

    #[derive(DeriveIden)]
    enum PurchaseOrderCounters {
        Table,
        BusinessId,
        Year,
        LastSeq,
    }
}

mod m20240101_000005_create_invoice_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_invoice_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Invoices::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Invoices::InvoiceNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Invoices::DueDate).timestamp_with_time_zone())
                        .col(ColumnDef::new(Invoices::Status).string().not_null())
                        .col(ColumnDef::new(Invoices::Subtotal).decimal().not_null())
                        .col(ColumnDef::new(Invoices::Tax).decimal().not_null())
                        .col(ColumnDef::new(Invoices::Total).decimal().not_null())
                        .col(ColumnDef::new(Invoices::BusinessId).uuid().not_null())
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InvoiceItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InvoiceItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InvoiceItems::InvoiceId).uuid().not_null())
                        .col(ColumnDef::new(InvoiceItems::ItemId).uuid())
                        .col(ColumnDef::new(InvoiceItems::Description).string())
                        .col(ColumnDef::new(InvoiceItems::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(InvoiceItems::UnitPrice)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InvoiceItems::Total).decimal().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_invoice_items_invoice")
                                .from(InvoiceItems::Table, InvoiceItems::InvoiceId)
                                .to(Invoices::Table, Invoices::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InvoiceItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        Id,
        InvoiceNumber,
        Date,
        DueDate,
        Status,
        Subtotal,
        Tax,
        Total,
        BusinessId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InvoiceItems {
        Table,
        Id,
        InvoiceId,
        ItemId,
        Description,
        Quantity,
        UnitPrice,
        Total,
    }
}

mod m20240101_000006_create_devices_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_devices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Devices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Devices::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Devices::Name).string().not_null())
                        .col(ColumnDef::new(Devices::SerialNumber).string())
                        .col(ColumnDef::new(Devices::Status).string())
                        .col(ColumnDef::new(Devices::AssignedTo).string())
                        .col(ColumnDef::new(Devices::BusinessId).uuid().not_null())
                        .col(
                            ColumnDef::new(Devices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Devices::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Devices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Devices {
        Table,
        Id,
        Name,
        SerialNumber,
        Status,
        AssignedTo,
        BusinessId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_audit_logs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_audit_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AuditLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AuditLogs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                        .col(ColumnDef::new(AuditLogs::ItemType).string().not_null())
                        .col(ColumnDef::new(AuditLogs::ItemId).uuid().not_null())
                        .col(ColumnDef::new(AuditLogs::Details).text())
                        .col(ColumnDef::new(AuditLogs::IpAddress).string())
                        .col(ColumnDef::new(AuditLogs::DeviceInfo).string())
                        .col(ColumnDef::new(AuditLogs::BusinessId).uuid().not_null())
                        .col(ColumnDef::new(AuditLogs::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(AuditLogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_audit_logs_business_created")
                        .table(AuditLogs::Table)
                        .col(AuditLogs::BusinessId)
                        .col(AuditLogs::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AuditLogs {
        Table,
        Id,
        Action,
        ItemType,
        ItemId,
        Details,
        IpAddress,
        DeviceInfo,
        BusinessId,
        UserId,
        CreatedAt,
    }
}
