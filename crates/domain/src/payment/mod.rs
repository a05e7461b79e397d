//! Payments and their processing contract.

mod acquirer;
mod card;
mod pix;

pub use acquirer::{AcquirerDecision, FixedAcquirer, RandomAcquirer};
pub use card::{CardDetails, CardType};
pub use pix::{PIX_VALIDITY_MINUTES, PixDetails};

use chrono::{DateTime, Utc};
use common::{Money, PaymentId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The status of a payment.
///
/// ```text
/// Pending ──► Processing ──┬──► Approved
///    │            │        └──► Rejected
///    └────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Approved,
    Rejected,
    Cancelled,
}

impl PaymentStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Approved | PaymentStatus::Rejected | PaymentStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Processing => "Processing",
            PaymentStatus::Approved => "Approved",
            PaymentStatus::Rejected => "Rejected",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method with its variant-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Pix(PixDetails),
    Card(CardDetails),
}

/// A payment attempt for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    amount: Money,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    status: PaymentStatus,
    rejection_reason: Option<String>,
    method: PaymentMethod,
}

impl Payment {
    /// Creates a Pix payment created now.
    pub fn pix(id: PaymentId, amount: Money, key: impl Into<String>) -> Result<Self, DomainError> {
        Self::pix_at(id, amount, key, Utc::now())
    }

    /// Creates a Pix payment as if created at `created_at`.
    pub fn pix_at(
        id: PaymentId,
        amount: Money,
        key: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let details = PixDetails::new(key, created_at)?;
        Self::build(id, amount, created_at, PaymentMethod::Pix(details))
    }

    /// Creates a card payment.
    pub fn card(id: PaymentId, amount: Money, details: CardDetails) -> Result<Self, DomainError> {
        Self::build(id, amount, Utc::now(), PaymentMethod::Card(details))
    }

    fn build(
        id: PaymentId,
        amount: Money,
        created_at: DateTime<Utc>,
        method: PaymentMethod,
    ) -> Result<Self, DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidPrice { price: amount });
        }

        Ok(Self {
            id,
            amount,
            created_at,
            processed_at: None,
            status: PaymentStatus::Pending,
            rejection_reason: None,
            method,
        })
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Returns why the payment was rejected, if it was.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn method(&self) -> &PaymentMethod {
        &self.method
    }

    /// Processes the payment against the current wall-clock time.
    ///
    /// Never fails: every outcome is reported as a boolean plus a status
    /// change. A payment that has already left `Pending` is not reprocessed.
    pub fn process(&mut self, acquirer: &dyn AcquirerDecision) -> bool {
        self.process_at(Utc::now(), acquirer)
    }

    /// Processes the payment as of `now`.
    pub fn process_at(&mut self, now: DateTime<Utc>, acquirer: &dyn AcquirerDecision) -> bool {
        if self.status != PaymentStatus::Pending {
            tracing::warn!(
                payment_id = %self.id,
                status = %self.status,
                "refusing to reprocess payment"
            );
            return false;
        }

        self.status = PaymentStatus::Processing;
        self.processed_at = Some(now);

        match self.run(now, acquirer) {
            Ok(approved) => approved,
            Err(e) => {
                self.reject(format!("processing error: {e}"));
                false
            }
        }
    }

    fn run(
        &mut self,
        now: DateTime<Utc>,
        acquirer: &dyn AcquirerDecision,
    ) -> Result<bool, DomainError> {
        let amount = self.amount;
        let declined = match &mut self.method {
            PaymentMethod::Pix(pix) => {
                if pix.is_expired(now) {
                    Some("Pix expired")
                } else {
                    pix.generate_qr_code(amount, now);
                    None
                }
            }
            PaymentMethod::Card(card) => {
                if !card.is_valid_on(now.date_naive()) {
                    Some("invalid card data")
                } else if !acquirer.approve(amount) {
                    Some("transaction declined by acquirer")
                } else {
                    None
                }
            }
        };

        if let Some(reason) = declined {
            self.reject(reason);
            return Ok(false);
        }

        self.confirm()?;
        Ok(true)
    }

    /// Moves a processing payment to `Approved`.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        if self.status != PaymentStatus::Processing {
            return Err(DomainError::invalid_payment(format!(
                "payment must be processing to be confirmed, was {}",
                self.status
            )));
        }
        self.status = PaymentStatus::Approved;
        tracing::info!(payment_id = %self.id, amount = %self.amount, "payment approved");
        Ok(())
    }

    /// Moves the payment to `Rejected`, recording the reason.
    pub fn reject(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(payment_id = %self.id, reason = %reason, "payment rejected");
        self.status = PaymentStatus::Rejected;
        self.rejection_reason = Some(reason);
    }

    /// Cancels a payment that has not reached a terminal status.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_payment(format!(
                "cannot cancel a payment in {} status",
                self.status
            )));
        }
        self.status = PaymentStatus::Cancelled;
        Ok(())
    }

    /// Fee percentage charged by the payment method.
    pub fn fee_percent(&self) -> u32 {
        match &self.method {
            PaymentMethod::Pix(_) => 0,
            PaymentMethod::Card(card) => card.fee_percent(),
        }
    }

    /// Fee amount for this payment.
    pub fn fee(&self) -> Money {
        self.amount.percentage(self.fee_percent())
    }

    /// Amount plus fee.
    pub fn amount_with_fee(&self) -> Money {
        self.amount + self.fee()
    }

    /// Human-readable method description, e.g. `PIX` or `Card Credit - 3x`.
    pub fn method_description(&self) -> String {
        match &self.method {
            PaymentMethod::Pix(_) => "PIX".to_string(),
            PaymentMethod::Card(card) => {
                format!("Card {} - {}x", card.card_type(), card.installments())
            }
        }
    }
}
