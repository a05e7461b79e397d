//! Domain layer for the storefront.
//!
//! This crate provides the core domain model including:
//! - Product and Customer entities
//! - Cart with stock-checked line items
//! - Payment variants (Pix, Card) with an injectable acquirer decision
//! - Order aggregate with its fulfillment state machine
//! - Pluggable shipping and discount strategies
//!
//! Everything here is synchronous. Live products are never stored inside carts
//! or orders; operations that read or mutate stock take an [`Inventory`].

pub mod cart;
pub mod customer;
pub mod discount;
pub mod error;
pub mod inventory;
pub mod order;
pub mod payment;
pub mod product;
pub mod shipping;

pub use cart::{Cart, CartItem};
pub use common::{CartId, CartItemId, CustomerId, Money, OrderId, PaymentId, ProductId};
pub use customer::Customer;
pub use discount::{Coupon, CouponDiscount, DiscountCalculator, FixedDiscount, PercentageDiscount};
pub use error::{DomainError, MAX_PRICE};
pub use inventory::{Detached, Inventory, inventory_of};
pub use order::{Order, OrderStatus};
pub use payment::{
    AcquirerDecision, CardDetails, CardType, FixedAcquirer, Payment, PaymentMethod,
    PaymentStatus, PixDetails, RandomAcquirer,
};
pub use product::Product;
pub use shipping::{
    ExpressShipping, FreeShippingAbove, ShippingCalculator, ShippingOption, StandardShipping,
};
