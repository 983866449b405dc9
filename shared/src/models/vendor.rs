//! Vendor profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vendor's business profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorProfile {
    pub uid: Uuid,
    pub vendor_name: String,
    pub business_name: String,
    /// Immutable after signup
    pub email: String,
    pub phone: Option<String>,
    pub business_location: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
    /// Compressed profile photo as a data URI
    pub photo_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VendorProfile {
    /// Name shown on listings: business name when set, vendor name otherwise
    pub fn display_name(&self) -> &str {
        if self.business_name.is_empty() {
            &self.vendor_name
        } else {
            &self.business_name
        }
    }
}
