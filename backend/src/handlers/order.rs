//! Order/inquiry HTTP handlers

use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    Json,
};
use futures::stream::Stream;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::OrderStatus;

use crate::services::order::{CreateInquiryInput, OrderFeed, OrderService};
use crate::AppState;

/// Optional status narrowing for list endpoints
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<OrderStatus>,
}

/// Body for a status transition
#[derive(Debug, Deserialize)]
pub struct TransitionInput {
    pub status: OrderStatus,
}

/// Create a new inquiry
pub async fn create_inquiry(
    State(state): State<AppState>,
    Json(input): Json<CreateInquiryInput>,
) -> impl IntoResponse {
    let service = OrderService::new(state.store.clone());

    match service.create_inquiry(input).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = OrderService::new(state.store.clone());

    match service.get_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Move an order to a new status
pub async fn transition_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<TransitionInput>,
) -> impl IntoResponse {
    let service = OrderService::new(state.store.clone());

    match service.transition(order_id, input.status).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all orders for a vendor, newest first
pub async fn list_vendor_orders(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Query(filter): Query<StatusFilter>,
) -> impl IntoResponse {
    let service = OrderService::new(state.store.clone());
    let orders = service.list_for_vendor(vendor_id, filter.status).await;

    (StatusCode::OK, Json(serde_json::json!({ "orders": orders }))).into_response()
}

/// List all orders created by a customer, newest first
pub async fn list_customer_orders(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Query(filter): Query<StatusFilter>,
) -> impl IntoResponse {
    let service = OrderService::new(state.store.clone());
    let orders = service.list_for_customer(customer_id, filter.status).await;

    (StatusCode::OK, Json(serde_json::json!({ "orders": orders }))).into_response()
}

/// Live view of a vendor's orders: the current set immediately, then a
/// fresh set whenever any order changes
pub async fn stream_vendor_orders(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let service = OrderService::new(state.store.clone());
    let feed = service.watch_for_vendor(vendor_id).await;

    Sse::new(feed_events(feed)).keep_alive(KeepAlive::default())
}

/// Live view of a customer's orders
pub async fn stream_customer_orders(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let service = OrderService::new(state.store.clone());
    let feed = service.watch_for_customer(customer_id).await;

    Sse::new(feed_events(feed)).keep_alive(KeepAlive::default())
}

fn feed_events(feed: OrderFeed) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold(feed, |mut feed| async move {
        let orders = feed.next().await?;
        let event = Event::default()
            .json_data(&orders)
            .unwrap_or_else(|_| Event::default().data("[]"));
        Some((Ok(event), feed))
    })
}
