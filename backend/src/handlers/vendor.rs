//! Vendor profile HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::vendor::{RegisterVendorInput, UpdateVendorInput, VendorService};
use crate::AppState;

/// Body for a profile photo upload
#[derive(Debug, Deserialize)]
pub struct PhotoInput {
    pub photo_data: String,
}

/// Register a new vendor profile
pub async fn register_vendor(
    State(state): State<AppState>,
    Json(input): Json<RegisterVendorInput>,
) -> impl IntoResponse {
    let service = VendorService::new(state.store.clone());

    match service.register(input).await {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a vendor's profile
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = VendorService::new(state.store.clone());

    match service.get_profile(vendor_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Edit a vendor's profile; the email address cannot change
pub async fn update_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(input): Json<UpdateVendorInput>,
) -> impl IntoResponse {
    let service = VendorService::new(state.store.clone());

    match service.update_profile(vendor_id, input).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Store a vendor's profile photo
pub async fn set_vendor_photo(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(input): Json<PhotoInput>,
) -> impl IntoResponse {
    let service = VendorService::new(state.store.clone());

    match service.set_photo(vendor_id, input.photo_data).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}
