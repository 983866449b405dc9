//! Vendor overview reporting
//!
//! The numbers behind the dashboard overview page: catalog size, inquiry
//! counts per status, and recent activity.

use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use shared::models::{Order, OrderStatus};

use crate::error::AppResult;
use crate::store::DocStore;

/// Reporting service for vendor dashboards
#[derive(Clone)]
pub struct ReportingService {
    store: DocStore,
}

/// Aggregated stats for one vendor
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VendorOverview {
    pub total_products: usize,
    pub total_inquiries: usize,
    pub new_inquiries: usize,
    pub responded: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub with_payment_proof: usize,
    /// Inquiries created in the last 7 days
    pub recent_inquiries: usize,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// Compute the overview stats for one vendor
    pub async fn vendor_overview(&self, vendor_id: Uuid) -> AppResult<VendorOverview> {
        let total_products = self
            .store
            .products
            .count(|p| p.vendor_id == vendor_id)
            .await;
        let orders = self
            .store
            .orders
            .find(|o| o.vendor.id == vendor_id)
            .await;

        Ok(summarize(total_products, &orders))
    }
}

fn summarize(total_products: usize, orders: &[Order]) -> VendorOverview {
    let week_ago = Utc::now() - Duration::days(7);
    let count_status =
        |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    VendorOverview {
        total_products,
        total_inquiries: orders.len(),
        new_inquiries: count_status(OrderStatus::InquirySent),
        responded: count_status(OrderStatus::Responded),
        in_progress: count_status(OrderStatus::InProgress),
        completed: count_status(OrderStatus::Completed),
        with_payment_proof: orders.iter().filter(|o| o.payment_proof.is_some()).count(),
        recent_inquiries: orders.iter().filter(|o| o.created_at >= week_ago).count(),
    }
}
