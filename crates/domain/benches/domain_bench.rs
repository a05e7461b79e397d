use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use domain::{
    Cart, CartId, CouponDiscount, CustomerId, DiscountCalculator, FixedAcquirer, Money, Order,
    OrderId, Payment, PaymentId, Product, ProductId, ShippingCalculator, StandardShipping,
    inventory_of,
};

fn products(count: u64) -> Vec<Product> {
    (1..=count)
        .map(|i| {
            Product::new(
                ProductId::new(i),
                format!("Product {i}"),
                Money::from_cents(1000 + i as i64),
                1_000_000,
            )
            .unwrap()
        })
        .collect()
}

fn bench_cart_add_item(c: &mut Criterion) {
    let catalog = products(20);

    c.bench_function("domain/cart_add_20_items", |b| {
        b.iter(|| {
            let mut cart = Cart::new(CartId::new(1), CustomerId::new(1));
            for product in &catalog {
                cart.add_item(product, 2).unwrap();
            }
            cart.total()
        });
    });
}

fn bench_checkout(c: &mut Criterion) {
    let catalog = products(20);
    let mut cart = Cart::new(CartId::new(1), CustomerId::new(1));
    for product in &catalog {
        cart.add_item(product, 2).unwrap();
    }
    let coupons = CouponDiscount::new();

    c.bench_function("domain/checkout_and_pay", |b| {
        b.iter_batched(
            || inventory_of(catalog.clone()),
            |mut inventory| {
                let mut order = Order::from_cart(OrderId::new(1), &cart, &inventory).unwrap();
                let shipping =
                    StandardShipping.calculate("01000-000", "20040-020", 1000, order.subtotal());
                order.set_shipping(shipping).unwrap();
                order
                    .apply_discount(coupons.calculate(order.subtotal(), Some("BEMVINDO10")))
                    .unwrap();
                let payment = Payment::pix(PaymentId::new(1), order.total(), "bench").unwrap();
                order.set_payment(payment).unwrap();
                order
                    .process_payment(&mut inventory, &FixedAcquirer::approving())
                    .unwrap()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_cart_add_item, bench_checkout);
criterion_main!(benches);
