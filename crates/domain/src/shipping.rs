//! Shipping cost strategies.
//!
//! No carrier is contacted. Distance between two ZIP codes is simulated
//! from a stable hash of both codes, so the same pair always quotes the
//! same price.

use chrono::Duration;
use common::Money;
use serde::{Deserialize, Serialize};

/// Computes shipping cost and delivery estimate for an order.
pub trait ShippingCalculator: Send + Sync {
    /// Returns the cost of shipping `weight_grams` from `origin_zip` to
    /// `destination_zip` for an order worth `order_value`.
    fn calculate(
        &self,
        origin_zip: &str,
        destination_zip: &str,
        weight_grams: u32,
        order_value: Money,
    ) -> Money;

    /// Returns a human-readable name for the shipping method.
    fn description(&self) -> String;

    /// Returns the estimated delivery time.
    fn estimated_time(&self, origin_zip: &str, destination_zip: &str) -> Duration;
}

/// 32-bit FNV-1a.
fn zip_hash(zip: &str) -> i64 {
    let hash = zip.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    i64::from(hash)
}

/// Simulated distance in km, always in `50..1050`.
fn simulated_distance(origin_zip: &str, destination_zip: &str) -> i64 {
    (zip_hash(origin_zip) - zip_hash(destination_zip)).abs() % 1000 + 50
}

/// Distance-based standard shipping: R$0.50 per kg plus R$0.10 per km.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardShipping;

impl StandardShipping {
    const PER_KG: Money = Money::from_cents(50);
    const PER_KM: Money = Money::from_cents(10);
}

impl ShippingCalculator for StandardShipping {
    fn calculate(
        &self,
        origin_zip: &str,
        destination_zip: &str,
        weight_grams: u32,
        _order_value: Money,
    ) -> Money {
        let distance = simulated_distance(origin_zip, destination_zip);
        Self::PER_KG.scale(i64::from(weight_grams), 1000) + Self::PER_KM.scale(distance, 1)
    }

    fn description(&self) -> String {
        "Standard".to_string()
    }

    fn estimated_time(&self, origin_zip: &str, destination_zip: &str) -> Duration {
        if simulated_distance(origin_zip, destination_zip) < 100 {
            Duration::days(3)
        } else {
            Duration::days(7)
        }
    }
}

/// Express shipping: 1.5x the standard cost in half the time, at least a day.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressShipping;

impl ShippingCalculator for ExpressShipping {
    fn calculate(
        &self,
        origin_zip: &str,
        destination_zip: &str,
        weight_grams: u32,
        order_value: Money,
    ) -> Money {
        StandardShipping
            .calculate(origin_zip, destination_zip, weight_grams, order_value)
            .scale(3, 2)
    }

    fn description(&self) -> String {
        "Express".to_string()
    }

    fn estimated_time(&self, origin_zip: &str, destination_zip: &str) -> Duration {
        let standard_days = StandardShipping
            .estimated_time(origin_zip, destination_zip)
            .num_days();
        Duration::days((standard_days / 2).max(1))
    }
}

/// Free shipping for orders worth at least `threshold`, standard otherwise.
#[derive(Debug, Clone, Copy)]
pub struct FreeShippingAbove {
    threshold: Money,
}

impl FreeShippingAbove {
    pub const DEFAULT_THRESHOLD: Money = Money::from_reais(100);

    pub fn new(threshold: Money) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Money {
        self.threshold
    }
}

impl Default for FreeShippingAbove {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl ShippingCalculator for FreeShippingAbove {
    fn calculate(
        &self,
        origin_zip: &str,
        destination_zip: &str,
        weight_grams: u32,
        order_value: Money,
    ) -> Money {
        if order_value >= self.threshold {
            Money::zero()
        } else {
            StandardShipping.calculate(origin_zip, destination_zip, weight_grams, order_value)
        }
    }

    fn description(&self) -> String {
        format!("Free shipping (orders from {})", self.threshold)
    }

    fn estimated_time(&self, origin_zip: &str, destination_zip: &str) -> Duration {
        StandardShipping.estimated_time(origin_zip, destination_zip)
    }
}

/// Shipping method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShippingOption {
    #[default]
    Standard,
    Express,
    Free,
}

impl ShippingOption {
    /// Returns the calculator for this option. `free_threshold` only applies
    /// to [`ShippingOption::Free`].
    pub fn calculator(self, free_threshold: Money) -> Box<dyn ShippingCalculator> {
        match self {
            ShippingOption::Standard => Box::new(StandardShipping),
            ShippingOption::Express => Box::new(ExpressShipping),
            ShippingOption::Free => Box::new(FreeShippingAbove::new(free_threshold)),
        }
    }
}
