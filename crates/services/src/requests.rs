//! Request types accepted by the services.
//!
//! Money fields are integer cents.

use chrono::NaiveDate;
use common::{CustomerId, Money};
use domain::{CardType, ShippingOption};
use serde::Deserialize;

/// Data for a new catalog product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

/// Partial product update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    #[serde(rename = "price_cents")]
    pub price: Option<Money>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

/// Data for a new customer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub cpf: String,
    #[serde(default)]
    pub phone: String,
}

/// Partial customer update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

/// Checkout request turning the customer's cart into an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub destination_zip: String,
    #[serde(default)]
    pub shipping: ShippingOption,
    #[serde(default)]
    pub coupon: Option<String>,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub notes: String,
}

impl CreateOrder {
    pub fn new(customer_id: CustomerId, destination_zip: impl Into<String>) -> Self {
        Self {
            customer_id,
            destination_zip: destination_zip.into(),
            shipping: ShippingOption::default(),
            coupon: None,
            delivery_address: String::new(),
            notes: String::new(),
        }
    }

    pub fn with_shipping(mut self, shipping: ShippingOption) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn with_coupon(mut self, coupon: impl Into<String>) -> Self {
        self.coupon = Some(coupon.into());
        self
    }

    pub fn with_delivery_address(mut self, address: impl Into<String>) -> Self {
        self.delivery_address = address.into();
        self
    }
}

fn single_installment() -> u32 {
    1
}

/// How the customer pays for an order. The amount is always the order total.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentRequest {
    Pix {
        key: String,
    },
    Card {
        number: String,
        holder_name: String,
        cvv: String,
        expiry: NaiveDate,
        card_type: CardType,
        #[serde(default = "single_installment")]
        installments: u32,
    },
}

/// Target status for a fulfillment update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status")]
pub enum StatusUpdate {
    Preparing,
    InTransit,
    Delivered,
    Cancelled {
        #[serde(default)]
        reason: Option<String>,
    },
}
