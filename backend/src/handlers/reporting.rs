//! Dashboard reporting HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::ReportingService;
use crate::AppState;

/// Overview stats for one vendor's dashboard
pub async fn vendor_overview(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ReportingService::new(state.store.clone());

    match service.vendor_overview(vendor_id).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => e.into_response(),
    }
}
