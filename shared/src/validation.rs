//! Validation rules for the Jos Marketplace Platform
//!
//! Attachment ceilings exist because files are embedded in documents as
//! base64 data URIs; the backing document store caps a document at ~1 MiB
//! unless the attachment collection allows more.

use crate::types::DataUri;

// ============================================================================
// Attachment limits
// ============================================================================

/// Ceiling for inquiry payment proofs (5 MiB)
pub const INQUIRY_PROOF_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Ceiling for product images (2 MiB)
pub const PRODUCT_IMAGE_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Ceiling for the stored (post-compression) profile photo, kept under the
/// ~1 MiB document limit with margin (900 KiB)
pub const PROFILE_PHOTO_MAX_STORED_BYTES: usize = 900 * 1024;

/// Formats accepted for payment proofs
pub const PAYMENT_PROOF_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "application/pdf",
];

/// Formats accepted for profile photos
pub const PROFILE_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

// ============================================================================
// Contact and message validations
// ============================================================================

/// Validate a required free-text field is non-empty after trimming
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Field must not be empty")
    } else {
        Ok(())
    }
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate an inquiry quantity
pub fn validate_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity >= 1 {
        Ok(())
    } else {
        Err("Quantity must be at least 1")
    }
}

// ============================================================================
// Attachment validations
// ============================================================================

/// Validate a payment proof data URI: allowed format, within the 5 MiB ceiling
pub fn validate_payment_proof(data: &str) -> Result<(), &'static str> {
    let uri = DataUri::parse(data).ok_or("Attachment must be a base64 data URI")?;
    if !PAYMENT_PROOF_TYPES.contains(&uri.mime_type) {
        return Err("Only JPG, PNG, GIF images or PDF files are accepted");
    }
    if uri.decoded_size() > INQUIRY_PROOF_MAX_BYTES {
        return Err("File size should be less than 5MB");
    }
    Ok(())
}

/// Validate a product image. Plain URLs pass through untouched; embedded
/// data URIs must be an image within the 2 MiB ceiling.
pub fn validate_product_image(image_url: &str) -> Result<(), &'static str> {
    let Some(uri) = DataUri::parse(image_url) else {
        return Ok(());
    };
    if !uri.mime_type.starts_with("image/") {
        return Err("Product image must be an image file");
    }
    if uri.decoded_size() > PRODUCT_IMAGE_MAX_BYTES {
        return Err("Image size must be less than 2MB");
    }
    Ok(())
}

/// Validate a profile photo in its stored (compressed) form
pub fn validate_profile_photo(data: &str) -> Result<(), &'static str> {
    let uri = DataUri::parse(data).ok_or("Photo must be a base64 data URI")?;
    if !PROFILE_PHOTO_TYPES.contains(&uri.mime_type) {
        return Err("Unsupported image format. Please use JPG, PNG or WebP");
    }
    if uri.decoded_size() > PROFILE_PHOTO_MAX_STORED_BYTES {
        return Err("Image still too large after compression. Try a smaller image");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn data_uri(mime: &str, bytes: usize) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(vec![0u8; bytes]);
        format!("data:{};base64,{}", mime, payload)
    }

    // ========================================================================
    // Contact and message validation tests
    // ========================================================================

    #[test]
    fn test_required_text_valid() {
        assert!(validate_required_text("Amina Bello").is_ok());
    }

    #[test]
    fn test_required_text_rejects_empty_and_whitespace() {
        assert!(validate_required_text("").is_err());
        assert!(validate_required_text("   ").is_err());
        assert!(validate_required_text("\n\t").is_err());
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.com.ng").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(50).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    // ========================================================================
    // Attachment validation tests
    // ========================================================================

    #[test]
    fn test_payment_proof_accepts_allowed_types() {
        for mime in PAYMENT_PROOF_TYPES {
            assert!(validate_payment_proof(&data_uri(mime, 1024)).is_ok());
        }
    }

    #[test]
    fn test_payment_proof_rejects_unsupported_type() {
        assert!(validate_payment_proof(&data_uri("text/plain", 1024)).is_err());
        assert!(validate_payment_proof(&data_uri("video/mp4", 1024)).is_err());
    }

    #[test]
    fn test_payment_proof_rejects_oversized() {
        assert!(validate_payment_proof(&data_uri("image/png", INQUIRY_PROOF_MAX_BYTES + 1)).is_err());
        assert!(validate_payment_proof(&data_uri("image/png", INQUIRY_PROOF_MAX_BYTES)).is_ok());
    }

    #[test]
    fn test_payment_proof_rejects_malformed() {
        assert!(validate_payment_proof("not a data uri").is_err());
        // Truncated payloads are malformed, not oversized
        assert_eq!(
            validate_payment_proof("data:image/png;base64,="),
            Err("Attachment must be a base64 data URI")
        );
        assert!(validate_payment_proof("data:image/png;base64,a=").is_err());
    }

    #[test]
    fn test_product_image_passes_plain_url() {
        assert!(validate_product_image("https://cdn.example.com/p.jpg").is_ok());
    }

    #[test]
    fn test_product_image_bounds() {
        assert!(validate_product_image(&data_uri("image/jpeg", 1024)).is_ok());
        assert!(validate_product_image(&data_uri("image/jpeg", PRODUCT_IMAGE_MAX_BYTES + 1)).is_err());
        assert!(validate_product_image(&data_uri("application/pdf", 1024)).is_err());
    }

    #[test]
    fn test_profile_photo_stored_ceiling() {
        assert!(validate_profile_photo(&data_uri("image/jpeg", 100 * 1024)).is_ok());
        assert!(validate_profile_photo(&data_uri("image/jpeg", PROFILE_PHOTO_MAX_STORED_BYTES + 1)).is_err());
        assert!(validate_profile_photo(&data_uri("image/gif", 1024)).is_err());
    }
}
