//! Vendor profile service

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::VendorProfile;
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::store::DocStore;

/// Vendor service for managing business profiles
#[derive(Clone)]
pub struct VendorService {
    store: DocStore,
}

/// Input for registering a vendor profile
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterVendorInput {
    pub vendor_name: String,
    #[serde(default)]
    pub business_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_location: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
}

/// Profile edits; the email field is intentionally absent — it is fixed at
/// signup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVendorInput {
    pub vendor_name: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub business_location: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
    /// Rejected when present and different from the stored address
    pub email: Option<String>,
}

impl VendorService {
    /// Create a new VendorService instance
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// Register a new vendor profile
    pub async fn register(&self, input: RegisterVendorInput) -> AppResult<VendorProfile> {
        validation::validate_required_text(&input.vendor_name)
            .map_err(|_| AppError::validation("vendor_name", "Vendor name is required"))?;
        validation::validate_email(input.email.trim())
            .map_err(|msg| AppError::validation("email", msg))?;

        let profile = self
            .store
            .vendors
            .create(|uid, now| VendorProfile {
                uid,
                vendor_name: input.vendor_name.trim().to_string(),
                business_name: input.business_name.trim().to_string(),
                email: input.email.trim().to_string(),
                phone: input.phone.clone(),
                business_location: input.business_location.clone(),
                business_category: input.business_category.clone(),
                business_description: input.business_description.clone(),
                photo_data: None,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(vendor_id = %profile.uid, "vendor registered");
        Ok(profile)
    }

    /// Point read of one profile
    pub async fn get_profile(&self, vendor_id: Uuid) -> AppResult<VendorProfile> {
        self.store
            .vendors
            .get(vendor_id)
            .await
            .ok_or_else(|| AppError::NotFound("Vendor".to_string()))
    }

    /// Update profile fields. Email is immutable after signup.
    pub async fn update_profile(
        &self,
        vendor_id: Uuid,
        input: UpdateVendorInput,
    ) -> AppResult<VendorProfile> {
        let existing = self.get_profile(vendor_id).await?;

        if let Some(email) = &input.email {
            if email.trim() != existing.email {
                return Err(AppError::EmailImmutable);
            }
        }
        if let Some(vendor_name) = &input.vendor_name {
            validation::validate_required_text(vendor_name)
                .map_err(|_| AppError::validation("vendor_name", "Vendor name is required"))?;
        }

        let updated = self
            .store
            .vendors
            .update_with(vendor_id, |profile| {
                if let Some(vendor_name) = input.vendor_name {
                    profile.vendor_name = vendor_name.trim().to_string();
                }
                if let Some(business_name) = input.business_name {
                    profile.business_name = business_name.trim().to_string();
                }
                if input.phone.is_some() {
                    profile.phone = input.phone;
                }
                if input.business_location.is_some() {
                    profile.business_location = input.business_location;
                }
                if input.business_category.is_some() {
                    profile.business_category = input.business_category;
                }
                if input.business_description.is_some() {
                    profile.business_description = input.business_description;
                }
                profile.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;

        Ok(updated)
    }

    /// Store a compressed profile photo. The data URI must already be in its
    /// stored form, under the document-size ceiling.
    pub async fn set_photo(&self, vendor_id: Uuid, photo_data: String) -> AppResult<VendorProfile> {
        validation::validate_profile_photo(&photo_data)
            .map_err(|msg| AppError::validation("photo_data", msg))?;

        self.get_profile(vendor_id).await?;
        let updated = self
            .store
            .vendors
            .update_with(vendor_id, |profile| {
                profile.photo_data = Some(photo_data);
                profile.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;

        Ok(updated)
    }
}
