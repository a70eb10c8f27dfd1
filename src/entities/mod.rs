//! Sea-ORM entities for every tenant-owned table.
//!
//! Every entity except `business` carries a `business_id` column; services
//! must filter on it for all reads and writes (tenant scoping).

pub mod audit_log;
pub mod business;
pub mod business_settings;
pub mod category;
pub mod device;
pub mod inventory_item;
pub mod inventory_transaction;
pub mod invoice;
pub mod invoice_item;
pub mod purchase_order;
pub mod purchase_order_counter;
pub mod purchase_order_item;
pub mod supplier;
