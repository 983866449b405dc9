//! Product catalog HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::product::{CreateProductInput, ProductQuery, ProductService, UpdateProductInput};
use crate::AppState;

/// List a new product
pub async fn create_product(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(input): Json<CreateProductInput>,
) -> impl IntoResponse {
    let service = ProductService::new(state.store.clone());

    match service.create_product(vendor_id, input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductService::new(state.store.clone());

    match service.get_product(product_id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Edit a product; only the owning vendor may do this
pub async fn update_product(
    State(state): State<AppState>,
    Path((vendor_id, product_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateProductInput>,
) -> impl IntoResponse {
    let service = ProductService::new(state.store.clone());

    match service.update_product(vendor_id, product_id, input).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a product; only the owning vendor may do this
pub async fn delete_product(
    State(state): State<AppState>,
    Path((vendor_id, product_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = ProductService::new(state.store.clone());

    match service.delete_product(vendor_id, product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// A vendor's catalog with search, category filter, and sort applied
pub async fn list_vendor_products(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    let service = ProductService::new(state.store.clone());
    let products = service.list_for_vendor(vendor_id, query).await;

    (
        StatusCode::OK,
        Json(serde_json::json!({ "products": products })),
    )
        .into_response()
}
