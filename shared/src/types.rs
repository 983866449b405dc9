//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// How a customer prefers to be contacted about an inquiry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Message,
    Email,
    Phone,
}

impl std::fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactMethod::Message => write!(f, "message"),
            ContactMethod::Email => write!(f, "email"),
            ContactMethod::Phone => write!(f, "phone"),
        }
    }
}

/// A base64 data URI (`data:<mime>;base64,<payload>`) as stored in a
/// document field in place of separate blob storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub mime_type: &'a str,
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    /// Split a data URI into its MIME type and base64 payload.
    /// Returns None for anything that is not a base64 data URI, including
    /// payloads whose shape is not valid padded base64 (length not a
    /// multiple of four, or more than two padding characters).
    pub fn parse(raw: &'a str) -> Option<Self> {
        let rest = raw.strip_prefix("data:")?;
        let (mime_type, payload) = rest.split_once(";base64,")?;
        if mime_type.is_empty() || payload.is_empty() {
            return None;
        }
        let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
        if payload.len() % 4 != 0 || padding > 2 {
            return None;
        }
        Some(Self { mime_type, payload })
    }

    /// Decoded size in bytes, computed from the payload length without
    /// allocating the decoded content. `parse` guarantees the payload is a
    /// non-empty multiple of four with at most two padding characters, so
    /// the subtraction cannot underflow.
    pub fn decoded_size(&self) -> usize {
        let padding = self.payload.bytes().rev().take_while(|&b| b == b'=').count();
        (self.payload.len() / 4) * 3 - padding
    }
}

/// Sort orders for vendor product listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Newest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri() {
        let uri = DataUri::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.mime_type, "image/png");
        assert_eq!(uri.payload, "aGVsbG8=");
    }

    #[test]
    fn test_parse_rejects_plain_url() {
        assert!(DataUri::parse("https://example.com/photo.png").is_none());
        assert!(DataUri::parse("data:image/png,rawbytes").is_none());
        assert!(DataUri::parse("data:;base64,aGVsbG8=").is_none());
    }

    #[test]
    fn test_parse_rejects_truncated_payloads() {
        // Bare or excess padding and lengths that are not a multiple of
        // four can never come out of a base64 encoder
        assert!(DataUri::parse("data:image/png;base64,=").is_none());
        assert!(DataUri::parse("data:image/png;base64,a=").is_none());
        assert!(DataUri::parse("data:image/png;base64,aGVsbG8").is_none());
        assert!(DataUri::parse("data:image/png;base64,====").is_none());
    }

    #[test]
    fn test_decoded_size() {
        // "hello" -> aGVsbG8= (5 bytes, one padding char)
        let uri = DataUri::parse("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.decoded_size(), 5);
        // "hell" -> aGVsbA== (4 bytes, two padding chars)
        let uri = DataUri::parse("data:text/plain;base64,aGVsbA==").unwrap();
        assert_eq!(uri.decoded_size(), 4);
    }

    #[test]
    fn test_contact_method_default() {
        assert_eq!(ContactMethod::default(), ContactMethod::Message);
    }
}
