//! Order service: checkout, payment and fulfillment.

use std::sync::Arc;
use std::time::Instant;

use common::{CustomerId, Money, OrderId};
use domain::{
    AcquirerDecision, CardDetails, Coupon, CouponDiscount, DiscountCalculator, DomainError,
    FreeShippingAbove, Order, OrderStatus, Payment, RandomAcquirer,
};

use crate::error::{Result, ServiceError};
use crate::repositories::Repositories;
use crate::requests::{CreateOrder, PaymentRequest, StatusUpdate};

/// Parcel weight used for every shipping quote.
const PARCEL_WEIGHT_GRAMS: u32 = 1000;

/// Checkout parameters.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// ZIP code shipments leave from.
    pub origin_zip: String,

    /// Order value from which free shipping applies.
    pub free_shipping_threshold: Money,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            origin_zip: "01000-000".to_string(),
            free_shipping_threshold: FreeShippingAbove::DEFAULT_THRESHOLD,
        }
    }
}

/// Result of a payment attempt.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub approved: bool,
    pub order: Order,
}

/// Service for managing orders.
#[derive(Clone)]
pub struct OrderService {
    repos: Repositories,
    settings: CheckoutSettings,
    acquirer: Arc<dyn AcquirerDecision>,
    coupons: CouponDiscount,
}

impl OrderService {
    /// Creates an order service with a randomized card acquirer.
    pub fn new(repos: Repositories, settings: CheckoutSettings) -> Self {
        Self::with_acquirer(repos, settings, Arc::new(RandomAcquirer::default()))
    }

    /// Creates an order service with the given card acquirer.
    pub fn with_acquirer(
        repos: Repositories,
        settings: CheckoutSettings,
        acquirer: Arc<dyn AcquirerDecision>,
    ) -> Self {
        Self {
            repos,
            settings,
            acquirer,
            coupons: CouponDiscount::new(),
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Turns the customer's cart into a pending order and clears the cart.
    ///
    /// Shipping is quoted against the cart total; a coupon, if given, is
    /// applied to the subtotal.
    #[tracing::instrument(skip(self, req), fields(customer_id = %req.customer_id))]
    pub async fn create_order(&self, req: CreateOrder) -> Result<Order> {
        let _guard = self.repos.write().await;

        if !self.repos.customers.exists(req.customer_id).await? {
            return Err(ServiceError::CustomerNotFound(req.customer_id));
        }

        let mut cart = match self.repos.carts.get_by_customer(req.customer_id).await? {
            Some(cart) if !cart.is_empty() => cart,
            _ => return Err(DomainError::EmptyCart.into()),
        };

        let inventory = self
            .repos
            .load_inventory(cart.items().iter().map(|i| i.product_id()).collect::<Vec<_>>())
            .await?;
        let mut order = Order::from_cart(self.repos.orders.next_id(), &cart, &inventory)?;
        order.set_delivery_address(req.delivery_address);
        order.set_notes(req.notes);

        let shipping = req
            .shipping
            .calculator(self.settings.free_shipping_threshold)
            .calculate(
                &self.settings.origin_zip,
                &req.destination_zip,
                PARCEL_WEIGHT_GRAMS,
                cart.total(),
            );
        order.set_shipping(shipping)?;

        if let Some(code) = req.coupon.as_deref().filter(|c| !c.trim().is_empty()) {
            let discount = self.coupons.calculate(order.subtotal(), Some(code));
            order.apply_discount(discount)?;
        }

        self.repos.orders.add(order.clone()).await?;

        cart.clear();
        self.repos.carts.update(cart).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            order_id = %order.id(),
            subtotal = %order.subtotal(),
            shipping = %order.shipping(),
            discount = %order.discount(),
            total = %order.total(),
            "order created"
        );
        Ok(order)
    }

    /// Attaches a payment for the order total and processes it.
    ///
    /// Approval confirms the order and decrements stock; rejection moves the
    /// order to `PaymentRejected`. Both outcomes are persisted.
    #[tracing::instrument(skip(self, req))]
    pub async fn process_payment(
        &self,
        order_id: OrderId,
        req: PaymentRequest,
    ) -> Result<PaymentOutcome> {
        let _guard = self.repos.write().await;
        let mut order = self.get(order_id).await?;

        let payment = self.build_payment(order.total(), req)?;
        order.set_payment(payment)?;

        let mut inventory = self
            .repos
            .load_inventory(order.items().iter().map(|i| i.product_id()).collect::<Vec<_>>())
            .await?;

        let start = Instant::now();
        let approved = order.process_payment(&mut inventory, self.acquirer.as_ref())?;
        metrics::histogram!("payment_processing_seconds").record(start.elapsed().as_secs_f64());

        if approved {
            self.repos.save_inventory(inventory).await?;
        }
        self.repos.orders.update(order.clone()).await?;

        let outcome = if approved { "approved" } else { "rejected" };
        metrics::counter!("payments_processed_total", "outcome" => outcome).increment(1);
        tracing::info!(
            order_id = %order_id,
            outcome,
            status = %order.status(),
            "payment processed"
        );

        Ok(PaymentOutcome { approved, order })
    }

    fn build_payment(&self, amount: Money, req: PaymentRequest) -> Result<Payment> {
        let id = self.repos.orders.next_payment_id();
        let payment = match req {
            PaymentRequest::Pix { key } => Payment::pix(id, amount, key)?,
            PaymentRequest::Card {
                number,
                holder_name,
                cvv,
                expiry,
                card_type,
                installments,
            } => {
                let card =
                    CardDetails::new(number, holder_name, cvv, expiry, card_type, installments)?;
                Payment::card(id, amount, card)?
            }
        };
        Ok(payment)
    }

    /// Moves the order along its fulfillment path.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, order_id: OrderId, update: StatusUpdate) -> Result<Order> {
        let transition: fn(&mut Order) -> std::result::Result<(), DomainError> = match update {
            StatusUpdate::Preparing => Order::start_preparation,
            StatusUpdate::InTransit => Order::start_transit,
            StatusUpdate::Delivered => Order::confirm_delivery,
            StatusUpdate::Cancelled { reason } => {
                let reason = reason.unwrap_or_else(|| "cancelled".to_string());
                return self.cancel(order_id, reason).await;
            }
        };

        let _guard = self.repos.write().await;
        let mut order = self.get(order_id).await?;
        transition(&mut order)?;

        self.repos.orders.update(order.clone()).await?;
        tracing::info!(order_id = %order_id, status = %order.status(), "order status updated");
        Ok(order)
    }

    /// Cancels the order, restocking products if it had been confirmed.
    #[tracing::instrument(skip(self, reason))]
    pub async fn cancel(&self, order_id: OrderId, reason: impl Into<String>) -> Result<Order> {
        let _guard = self.repos.write().await;
        let mut order = self.get(order_id).await?;

        let mut inventory = self
            .repos
            .load_inventory(order.items().iter().map(|i| i.product_id()).collect::<Vec<_>>())
            .await?;
        let restocks = order.status().restocks_on_cancel();
        order.cancel(reason, &mut inventory)?;

        if restocks {
            self.repos.save_inventory(inventory).await?;
        }
        self.repos.orders.update(order.clone()).await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        Ok(order)
    }

    pub async fn get(&self, order_id: OrderId) -> Result<Order> {
        self.repos
            .orders
            .get(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))
    }

    /// Lists a customer's orders, newest first.
    pub async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        Ok(self.repos.orders.list_by_customer(customer_id).await?)
    }

    /// Lists all orders, newest first.
    pub async fn list_all(&self) -> Result<Vec<Order>> {
        Ok(self.repos.orders.list_all().await?)
    }

    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        Ok(self.repos.orders.list_by_status(status).await?)
    }

    /// Returns the coupons currently honored at checkout.
    pub fn valid_coupons(&self) -> Vec<(String, Coupon)> {
        self.coupons.valid_coupons()
    }
}
