//! Route definitions for the Jos Marketplace Platform

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Order/inquiry lifecycle
        .nest("/orders", order_routes())
        // Vendor profiles and vendor-scoped resources
        .nest("/vendors", vendor_routes())
        // Point reads into the shared catalog
        .nest("/products", product_routes())
}

/// Order management routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::order::create_inquiry))
        .route("/:order_id", get(handlers::order::get_order))
        .route("/:order_id/status", post(handlers::order::transition_order))
        .route("/customer/:customer_id", get(handlers::order::list_customer_orders))
        .route(
            "/customer/:customer_id/stream",
            get(handlers::order::stream_customer_orders),
        )
}

/// Vendor profile and vendor-scoped routes
fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::vendor::register_vendor))
        .route(
            "/:vendor_id",
            get(handlers::vendor::get_vendor).put(handlers::vendor::update_vendor),
        )
        .route("/:vendor_id/photo", put(handlers::vendor::set_vendor_photo))
        .route("/:vendor_id/overview", get(handlers::reporting::vendor_overview))
        // Catalog
        .route(
            "/:vendor_id/products",
            get(handlers::product::list_vendor_products).post(handlers::product::create_product),
        )
        .route(
            "/:vendor_id/products/:product_id",
            put(handlers::product::update_product).delete(handlers::product::delete_product),
        )
        // Orders addressed to this vendor
        .route("/:vendor_id/orders", get(handlers::order::list_vendor_orders))
        .route(
            "/:vendor_id/orders/stream",
            get(handlers::order::stream_vendor_orders),
        )
}

/// Product routes (public catalog reads)
fn product_routes() -> Router<AppState> {
    Router::new().route("/:product_id", get(handlers::product::get_product))
}
