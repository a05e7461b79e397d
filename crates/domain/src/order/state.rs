//! Order status machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Status transitions:
/// ```text
/// Pending ──► ProcessingPayment ──┬──► Confirmed ──► Preparing ──► InTransit ──► Delivered
///                                 └──► PaymentRejected
///
/// any status except Delivered ──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order created from a cart, awaiting payment.
    #[default]
    Pending,

    /// Attached payment is being processed.
    ProcessingPayment,

    /// Payment approved and stock decremented.
    Confirmed,

    /// Order is being prepared for shipment.
    Preparing,

    /// Order has left the warehouse.
    InTransit,

    /// Order was delivered (terminal state).
    Delivered,

    /// Order was cancelled (terminal state).
    Cancelled,

    /// Payment was rejected; only cancellation remains.
    PaymentRejected,
}

impl OrderStatus {
    /// Returns true if a payment can be processed in this status.
    pub fn can_process_payment(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if preparation can start in this status.
    pub fn can_start_preparation(&self) -> bool {
        matches!(self, OrderStatus::Confirmed)
    }

    /// Returns true if the order can be shipped in this status.
    pub fn can_start_transit(&self) -> bool {
        matches!(self, OrderStatus::Preparing)
    }

    /// Returns true if delivery can be confirmed in this status.
    pub fn can_confirm_delivery(&self) -> bool {
        matches!(self, OrderStatus::InTransit)
    }

    /// Returns true if the order can be cancelled in this status.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }

    /// Returns true if stock was decremented on reaching this status and
    /// must be given back when the order is cancelled.
    pub fn restocks_on_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed | OrderStatus::Preparing | OrderStatus::InTransit
        )
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::ProcessingPayment => "ProcessingPayment",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::InTransit => "InTransit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::PaymentRejected => "PaymentRejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::ProcessingPayment,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::PaymentRejected,
    ];

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_only_pending_can_process_payment() {
        for status in ALL {
            assert_eq!(
                status.can_process_payment(),
                status == OrderStatus::Pending,
                "{status}"
            );
        }
    }

    #[test]
    fn test_fulfillment_guards() {
        assert!(OrderStatus::Confirmed.can_start_preparation());
        assert!(!OrderStatus::Pending.can_start_preparation());
        assert!(OrderStatus::Preparing.can_start_transit());
        assert!(!OrderStatus::Confirmed.can_start_transit());
        assert!(OrderStatus::InTransit.can_confirm_delivery());
        assert!(!OrderStatus::Preparing.can_confirm_delivery());
    }

    #[test]
    fn test_can_cancel_anything_but_delivered() {
        for status in ALL {
            assert_eq!(
                status.can_cancel(),
                status != OrderStatus::Delivered,
                "{status}"
            );
        }
    }

    #[test]
    fn test_restocks_on_cancel() {
        assert!(OrderStatus::Confirmed.restocks_on_cancel());
        assert!(OrderStatus::Preparing.restocks_on_cancel());
        assert!(OrderStatus::InTransit.restocks_on_cancel());
        assert!(!OrderStatus::Pending.restocks_on_cancel());
        assert!(!OrderStatus::PaymentRejected.restocks_on_cancel());
        assert!(!OrderStatus::Cancelled.restocks_on_cancel());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::PaymentRejected.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Pending.to_string(), "Pending");
        assert_eq!(OrderStatus::InTransit.to_string(), "InTransit");
        assert_eq!(OrderStatus::PaymentRejected.to_string(), "PaymentRejected");
    }

    #[test]
    fn test_serialization() {
        let status = OrderStatus::Preparing;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"Preparing\"");
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
