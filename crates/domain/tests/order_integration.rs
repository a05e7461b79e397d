//! Integration tests for the checkout lifecycle.
//!
//! These tests drive a cart through order creation, shipping and discount
//! adjustments, payment, fulfillment and cancellation, checking stock at
//! each step.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use domain::{
    CardDetails, CardType, Cart, CartId, CouponDiscount, CustomerId, DiscountCalculator,
    DomainError, FixedAcquirer, Money, Order, OrderId, OrderStatus, Payment, PaymentId,
    PaymentStatus, Product, ProductId, ShippingOption, inventory_of,
};

const ORIGIN: &str = "01000-000";
const DEST: &str = "30130-010";

fn catalog() -> HashMap<ProductId, Product> {
    inventory_of([
        Product::new(ProductId::new(1), "Keyboard", Money::from_reais(150), 10)
            .unwrap()
            .with_category("Peripherals"),
        Product::new(ProductId::new(2), "Mouse Pad", Money::from_cents(2590), 3)
            .unwrap()
            .with_category("Peripherals"),
    ])
}

fn filled_cart(inventory: &HashMap<ProductId, Product>) -> Cart {
    let mut cart = Cart::new(CartId::new(1), CustomerId::new(1));
    cart.add_item(&inventory[&ProductId::new(1)], 1).unwrap();
    cart.add_item(&inventory[&ProductId::new(2)], 2).unwrap();
    cart
}

fn credit_card(installments: u32) -> CardDetails {
    CardDetails::new(
        "5500000000000004",
        "Joao Souza",
        "321",
        NaiveDate::from_ymd_opt(2099, 6, 30).unwrap(),
        CardType::Credit,
        installments,
    )
    .unwrap()
}

mod checkout_lifecycle {
    use super::*;

    #[test]
    fn cart_to_delivered_order() {
        let mut inventory = catalog();
        let mut cart = filled_cart(&inventory);
        assert_eq!(cart.total(), Money::from_cents(20180));

        let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(order.items().len(), 2);

        let shipping = ShippingOption::Express
            .calculator(Money::from_reais(100))
            .calculate(ORIGIN, DEST, 1000, order.subtotal());
        order.set_shipping(shipping).unwrap();

        let discount = CouponDiscount::new().calculate(order.subtotal(), Some("bemvindo10"));
        assert_eq!(discount, Money::from_cents(2018));
        order.apply_discount(discount).unwrap();
        assert_eq!(order.total(), order.subtotal() + shipping - discount);

        let payment = Payment::card(PaymentId::new(1), order.total(), credit_card(3)).unwrap();
        order.set_payment(payment).unwrap();
        let approved = order
            .process_payment(&mut inventory, &FixedAcquirer::approving())
            .unwrap();

        assert!(approved);
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.payment().unwrap().fee_percent(), 5);
        assert_eq!(inventory[&ProductId::new(1)].stock(), 9);
        assert_eq!(inventory[&ProductId::new(2)].stock(), 1);

        order.start_preparation().unwrap();
        order.start_transit().unwrap();
        order.confirm_delivery().unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert!(order.cancel("too late", &mut inventory).is_err());
    }

    #[test]
    fn free_shipping_above_threshold() {
        let inventory = catalog();
        let cart = filled_cart(&inventory);
        let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();

        let shipping = ShippingOption::Free
            .calculator(Money::from_reais(100))
            .calculate(ORIGIN, DEST, 1000, cart.total());
        order.set_shipping(shipping).unwrap();

        assert_eq!(order.shipping(), Money::zero());
        assert_eq!(order.total(), order.subtotal());
    }
}

mod payment_outcomes {
    use super::*;

    #[test]
    fn declined_card_rejects_order_without_touching_stock() {
        let mut inventory = catalog();
        let cart = filled_cart(&inventory);
        let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();
        order
            .set_payment(Payment::card(PaymentId::new(1), order.total(), credit_card(1)).unwrap())
            .unwrap();

        let approved = order
            .process_payment(&mut inventory, &FixedAcquirer::declining())
            .unwrap();

        assert!(!approved);
        assert_eq!(order.status(), OrderStatus::PaymentRejected);
        assert_eq!(order.payment().unwrap().status(), PaymentStatus::Rejected);
        assert_eq!(inventory[&ProductId::new(1)].stock(), 10);

        // a rejected order can still be cancelled, without restock
        order.cancel("payment failed", &mut inventory).unwrap();
        assert_eq!(inventory[&ProductId::new(2)].stock(), 3);
    }

    #[test]
    fn expired_pix_rejects_order() {
        let mut inventory = catalog();
        let cart = filled_cart(&inventory);
        let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();

        let created = Utc::now() - Duration::minutes(45);
        let pix = Payment::pix_at(PaymentId::new(1), order.total(), "shop@pix", created).unwrap();
        order.set_payment(pix).unwrap();

        let approved = order
            .process_payment(&mut inventory, &FixedAcquirer::approving())
            .unwrap();

        assert!(!approved);
        assert_eq!(order.status(), OrderStatus::PaymentRejected);
        assert_eq!(
            order.payment().unwrap().rejection_reason(),
            Some("Pix expired")
        );
    }

    #[test]
    fn second_payment_attempt_is_refused() {
        let mut inventory = catalog();
        let cart = filled_cart(&inventory);
        let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();
        order
            .set_payment(Payment::pix(PaymentId::new(1), order.total(), "shop@pix").unwrap())
            .unwrap();
        assert!(
            order
                .process_payment(&mut inventory, &FixedAcquirer::approving())
                .unwrap()
        );

        let result = order.process_payment(&mut inventory, &FixedAcquirer::approving());
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition {
                from: OrderStatus::Confirmed,
                ..
            })
        ));
        assert_eq!(inventory[&ProductId::new(1)].stock(), 9);
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn cancelling_in_transit_restores_stock() {
        let mut inventory = catalog();
        let cart = filled_cart(&inventory);
        let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();
        order
            .set_payment(Payment::pix(PaymentId::new(1), order.total(), "shop@pix").unwrap())
            .unwrap();
        order
            .process_payment(&mut inventory, &FixedAcquirer::approving())
            .unwrap();
        order.start_preparation().unwrap();
        order.start_transit().unwrap();

        order.cancel("lost by carrier", &mut inventory).unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(inventory[&ProductId::new(1)].stock(), 10);
        assert_eq!(inventory[&ProductId::new(2)].stock(), 3);
    }

    #[test]
    fn stock_round_trip_restores_level() {
        let mut inventory = catalog();
        let product = inventory.get_mut(&ProductId::new(1)).unwrap();
        for qty in [1, 4, 10] {
            product.decrease_stock(qty).unwrap();
            product.increase_stock(qty).unwrap();
            assert_eq!(product.stock(), 10);
        }
    }
}
