//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use super::OrderStatus;
use crate::cart::{Cart, CartItem};
use crate::error::DomainError;
use crate::inventory::Inventory;
use crate::payment::{AcquirerDecision, Payment};

/// Largest difference between a payment amount and the order total that is
/// still accepted.
const PAYMENT_TOLERANCE: Money = Money::from_cents(1);

/// Order aggregate root.
///
/// Created only from a non-empty cart. The items are a copy of the cart's
/// lines at creation time and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Customer who placed the order.
    customer_id: CustomerId,

    created_at: DateTime<Utc>,

    /// Current status of the order.
    status: OrderStatus,

    /// Snapshot of the cart lines.
    items: Vec<CartItem>,

    shipping: Money,
    discount: Money,
    payment: Option<Payment>,
    delivery_address: String,
    notes: String,
    cancellation_reason: Option<String>,
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer ID.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns all items in the order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns an item by product ID.
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    pub fn shipping(&self) -> Money {
        self.shipping
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    /// Returns the attached payment, if any.
    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the reason given on cancellation.
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns the sum of item subtotals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Returns `subtotal + shipping - discount`.
    pub fn total(&self) -> Money {
        self.subtotal() + self.shipping - self.discount
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Command methods
impl Order {
    /// Creates a pending order from a snapshot of the cart's lines.
    ///
    /// The cart is re-validated against `inventory` first. The cart itself is
    /// left untouched; clearing it is up to the caller.
    pub fn from_cart<I: Inventory + ?Sized>(
        id: OrderId,
        cart: &Cart,
        inventory: &I,
    ) -> Result<Self, DomainError> {
        cart.validate_for_checkout(inventory)?;

        let items = cart.items().to_vec();
        if items.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        Ok(Self {
            id,
            customer_id: cart.customer_id(),
            created_at: Utc::now(),
            status: OrderStatus::Pending,
            items,
            shipping: Money::zero(),
            discount: Money::zero(),
            payment: None,
            delivery_address: String::new(),
            notes: String::new(),
            cancellation_reason: None,
        })
    }

    pub fn set_delivery_address(&mut self, address: impl Into<String>) {
        self.delivery_address = address.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Fails unless the order still takes price adjustments.
    fn require_adjustable(&self, action: &'static str) -> Result<(), DomainError> {
        if !self.status.can_process_payment() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action,
            });
        }
        Ok(())
    }

    /// Sets the shipping cost. Only allowed while the order is `Pending`.
    pub fn set_shipping(&mut self, shipping: Money) -> Result<(), DomainError> {
        self.require_adjustable("set shipping")?;
        if shipping.is_negative() {
            return Err(DomainError::invalid_argument(
                "shipping",
                format!("must not be negative, got {shipping}"),
            ));
        }
        self.shipping = shipping;
        Ok(())
    }

    /// Applies a discount of at most the subtotal. Only allowed while the
    /// order is `Pending`.
    pub fn apply_discount(&mut self, discount: Money) -> Result<(), DomainError> {
        self.require_adjustable("apply discount")?;
        if discount.is_negative() {
            return Err(DomainError::invalid_argument(
                "discount",
                format!("must not be negative, got {discount}"),
            ));
        }
        let subtotal = self.subtotal();
        if discount > subtotal {
            return Err(DomainError::invalid_argument(
                "discount",
                format!("{discount} exceeds the subtotal of {subtotal}"),
            ));
        }
        self.discount = discount;
        Ok(())
    }

    /// Attaches a payment whose amount matches the order total.
    pub fn set_payment(&mut self, payment: Payment) -> Result<(), DomainError> {
        if !self.status.can_process_payment() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action: "set payment",
            });
        }

        let total = self.total();
        if payment.amount().abs_diff(total) > PAYMENT_TOLERANCE {
            return Err(DomainError::invalid_payment(format!(
                "payment amount {} does not match order total {total}",
                payment.amount()
            )));
        }

        self.payment = Some(payment);
        Ok(())
    }

    /// Processes the attached payment.
    ///
    /// Stock for every attached product is checked before the payment runs;
    /// a shortage leaves the order `Pending` and the payment untouched. On
    /// approval the order becomes `Confirmed` and the stock is decremented.
    /// On rejection it becomes `PaymentRejected` and stock is unchanged.
    pub fn process_payment<I: Inventory + ?Sized>(
        &mut self,
        inventory: &mut I,
        acquirer: &dyn AcquirerDecision,
    ) -> Result<bool, DomainError> {
        if self.payment.is_none() {
            return Err(DomainError::invalid_payment("no payment attached"));
        }
        if !self.status.can_process_payment() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action: "process payment",
            });
        }

        for item in &self.items {
            if let Some(product) = inventory.product(item.product_id())
                && !product.has_sufficient_stock(item.quantity())
            {
                return Err(product.insufficient(item.quantity()));
            }
        }

        let total = self.total();
        let Some(payment) = self.payment.as_mut() else {
            return Err(DomainError::invalid_payment("no payment attached"));
        };
        // shipping or discount may have changed since the payment was attached
        if payment.amount().abs_diff(total) > PAYMENT_TOLERANCE {
            return Err(DomainError::invalid_payment(format!(
                "payment amount {} no longer matches order total {total}",
                payment.amount()
            )));
        }

        self.status = OrderStatus::ProcessingPayment;
        let approved = payment.process(acquirer);

        if !approved {
            self.status = OrderStatus::PaymentRejected;
            tracing::warn!(order_id = %self.id, "order payment rejected");
            return Ok(false);
        }

        self.status = OrderStatus::Confirmed;
        for item in &self.items {
            if let Some(product) = inventory.product_mut(item.product_id()) {
                product.decrease_stock(item.quantity())?;
            }
        }

        tracing::info!(order_id = %self.id, total = %self.total(), "order confirmed");
        Ok(true)
    }

    /// Moves a confirmed order to `Preparing`.
    pub fn start_preparation(&mut self) -> Result<(), DomainError> {
        if !self.status.can_start_preparation() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action: "start preparation",
            });
        }
        self.status = OrderStatus::Preparing;
        Ok(())
    }

    /// Moves a preparing order to `InTransit`.
    pub fn start_transit(&mut self) -> Result<(), DomainError> {
        if !self.status.can_start_transit() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action: "start transit",
            });
        }
        self.status = OrderStatus::InTransit;
        Ok(())
    }

    /// Moves an order in transit to `Delivered`.
    pub fn confirm_delivery(&mut self) -> Result<(), DomainError> {
        if !self.status.can_confirm_delivery() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action: "confirm delivery",
            });
        }
        self.status = OrderStatus::Delivered;
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Stock is given back for attached products when the order had already
    /// been confirmed (Confirmed, Preparing or InTransit).
    pub fn cancel<I: Inventory + ?Sized>(
        &mut self,
        reason: impl Into<String>,
        inventory: &mut I,
    ) -> Result<(), DomainError> {
        let previous = self.status;
        if !previous.can_cancel() {
            return Err(DomainError::InvalidTransition {
                from: previous,
                action: "cancel",
            });
        }

        if previous.restocks_on_cancel() {
            for item in &self.items {
                if let Some(product) = inventory.product_mut(item.product_id()) {
                    product.increase_stock(item.quantity())?;
                }
            }
        }

        self.status = OrderStatus::Cancelled;
        self.cancellation_reason = Some(reason.into());

        tracing::info!(
            order_id = %self.id,
            from = %previous,
            restocked = previous.restocks_on_cancel(),
            "order cancelled"
        );
        Ok(())
    }
}
