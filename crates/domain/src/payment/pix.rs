//! Pix instant payment details.

use chrono::{DateTime, Duration, Utc};
use common::Money;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, require_non_blank};

/// How long a Pix charge stays payable after creation.
pub const PIX_VALIDITY_MINUTES: i64 = 30;

/// Pix key, generated QR code, and validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixDetails {
    key: String,
    qr_code: Option<String>,
    expires_at: DateTime<Utc>,
}

impl PixDetails {
    /// Creates Pix details valid for 30 minutes from `created_at`.
    pub fn new(key: impl Into<String>, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        Ok(Self {
            key: require_non_blank("pix key", key.into())?,
            qr_code: None,
            expires_at: created_at + Duration::minutes(PIX_VALIDITY_MINUTES),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the QR code, generated on successful processing.
    pub fn qr_code(&self) -> Option<&str> {
        self.qr_code.as_deref()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub(crate) fn generate_qr_code(&mut self, amount: Money, now: DateTime<Utc>) {
        self.qr_code = Some(format!(
            "PIX_{}_{}_{}",
            self.key,
            amount.cents(),
            now.format("%Y%m%d%H%M%S")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_window() {
        let created = Utc::now();
        let pix = PixDetails::new("key@example.com", created).unwrap();
        assert!(!pix.is_expired(created + Duration::minutes(30)));
        assert!(pix.is_expired(created + Duration::minutes(31)));
    }

    #[test]
    fn test_blank_key_rejected() {
        assert!(matches!(
            PixDetails::new(" ", Utc::now()),
            Err(DomainError::InvalidArgument { field: "pix key", .. })
        ));
    }

    #[test]
    fn test_qr_code_contains_key_and_amount() {
        let now = Utc::now();
        let mut pix = PixDetails::new("abc", now).unwrap();
        assert!(pix.qr_code().is_none());
        pix.generate_qr_code(Money::from_cents(2500), now);
        let code = pix.qr_code().unwrap();
        assert!(code.starts_with("PIX_abc_2500_"));
    }
}
