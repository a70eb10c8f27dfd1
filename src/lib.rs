//! Multi-tenant inventory backend for small businesses.
//!
//! The core is the inventory ledger: every stock level change runs as one
//! transaction covering the conditional quantity update, an append-only
//! movement row, and an audit entry. Purchase orders feed the same ledger
//! on receipt. Everything is scoped to the caller's business.

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::services::AppServices;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: AppConfig) -> Self {
        let services = AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/business/setup", post(handlers::business::setup_business))
        .route(
            "/business/settings",
            get(handlers::business::get_settings).put(handlers::business::update_settings),
        )
        .route(
            "/business/:id/data",
            delete(handlers::business::clear_business_data),
        )
        .route(
            "/inventory",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route(
            "/inventory/:id",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        )
        .route(
            "/inventory/:id/receive",
            post(handlers::stock_movements::receive_stock),
        )
        .route(
            "/inventory/:id/deploy",
            post(handlers::stock_movements::deploy_stock),
        )
        .route(
            "/purchase-orders",
            get(handlers::purchase_orders::list_orders)
                .post(handlers::purchase_orders::create_order),
        )
        .route(
            "/purchase-orders/:id",
            get(handlers::purchase_orders::get_order),
        )
        .route(
            "/purchase-orders/:id/receive",
            post(handlers::purchase_orders::receive_order),
        )
        .route(
            "/purchase-orders/:id/status",
            put(handlers::purchase_orders::set_order_status),
        )
        .route("/audit-logs", get(handlers::audit::list_audit_logs))
}

/// Builds the full application router with middleware.
pub fn app_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
