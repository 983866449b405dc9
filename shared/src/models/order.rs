//! Order/inquiry models and the status lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ContactMethod;

/// A customer's product inquiry, tracked through a small status lifecycle.
///
/// Product and vendor details are embedded as snapshots taken at inquiry
/// time, not live references: what the customer saw is what the record keeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    /// None for anonymous inquiries
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub message: String,
    pub quantity: u32,
    pub delivery_address: Option<String>,
    pub preferred_contact_method: ContactMethod,
    pub payment_proof: Option<PaymentProof>,
    pub product: ProductSnapshot,
    pub vendor: VendorSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status of an order, progressing linearly from inquiry to completion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    InquirySent,
    Responded,
    InProgress,
    Completed,
}

impl OrderStatus {
    /// The statuses this one may move to. `InquirySent` can jump straight to
    /// `InProgress` (a vendor may start processing without a separate
    /// response step); nothing ever moves backward, and `Completed` is
    /// terminal.
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::InquirySent => &[OrderStatus::Responded, OrderStatus::InProgress],
            OrderStatus::Responded => &[OrderStatus::InProgress],
            OrderStatus::InProgress => &[OrderStatus::Completed],
            OrderStatus::Completed => &[],
        }
    }

    /// Whether `next` is a legal move from this status. Re-applying the
    /// current status counts as legal and is treated as a no-op by callers.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        *self == next || self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::InquirySent => write!(f, "New Inquiry"),
            OrderStatus::Responded => write!(f, "Responded"),
            OrderStatus::InProgress => write!(f, "In Progress"),
            OrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Payment proof attached to an inquiry, stored inline as a data URI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProof {
    /// `data:<mime>;base64,...` encoded file content
    pub data: String,
    /// Original file name shown to the vendor
    pub file_name: String,
}

/// Product details copied into the order at inquiry time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub category: String,
}

/// Vendor contact details copied into the order at inquiry time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}
