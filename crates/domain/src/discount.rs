//! Discount strategies.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use common::Money;
use serde::{Deserialize, Serialize};

/// Computes the discount for an order value.
///
/// A miss (unknown coupon, expired coupon, value below the minimum) yields
/// a zero discount rather than an error.
pub trait DiscountCalculator: Send + Sync {
    /// Returns the discount for `total`, optionally keyed by a coupon code.
    fn calculate(&self, total: Money, coupon: Option<&str>) -> Money;

    /// Returns true if `code` would currently be honored.
    fn validate_coupon(&self, code: &str) -> bool;

    fn description(&self) -> String;
}

/// Flat percentage off orders worth at least `minimum`.
#[derive(Debug, Clone, Copy)]
pub struct PercentageDiscount {
    percent: u32,
    minimum: Money,
}

impl PercentageDiscount {
    pub fn new(percent: u32, minimum: Money) -> Self {
        Self { percent, minimum }
    }
}

impl DiscountCalculator for PercentageDiscount {
    fn calculate(&self, total: Money, _coupon: Option<&str>) -> Money {
        if total < self.minimum {
            return Money::zero();
        }
        total.percentage(self.percent)
    }

    fn validate_coupon(&self, _code: &str) -> bool {
        true
    }

    fn description(&self) -> String {
        format!("{}% off (minimum {})", self.percent, self.minimum)
    }
}

/// Fixed amount off, capped at the order value.
#[derive(Debug, Clone, Copy)]
pub struct FixedDiscount {
    amount: Money,
    minimum: Money,
}

impl FixedDiscount {
    pub fn new(amount: Money, minimum: Money) -> Self {
        Self { amount, minimum }
    }
}

impl DiscountCalculator for FixedDiscount {
    fn calculate(&self, total: Money, _coupon: Option<&str>) -> Money {
        if total < self.minimum {
            return Money::zero();
        }
        self.amount.min(total)
    }

    fn validate_coupon(&self, _code: &str) -> bool {
        true
    }

    fn description(&self) -> String {
        format!("{} off (minimum {})", self.amount, self.minimum)
    }
}

/// A promotional coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub percent: u32,
    pub expires_at: DateTime<Utc>,
    pub minimum: Money,
}

impl Coupon {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Coupon table keyed by upper-case code.
#[derive(Debug, Clone)]
pub struct CouponDiscount {
    coupons: HashMap<String, Coupon>,
}

impl CouponDiscount {
    /// Creates the table with the standard promotions, valid from now.
    pub fn new() -> Self {
        let now = Utc::now();
        let coupon = |percent, days, minimum_reais| Coupon {
            percent,
            expires_at: now + Duration::days(days),
            minimum: Money::from_reais(minimum_reais),
        };

        Self::with_coupons([
            ("BEMVINDO10", coupon(10, 30, 50)),
            ("BLACKFRIDAY", coupon(20, 7, 100)),
            ("FRETE15", coupon(15, 15, 0)),
        ])
    }

    /// Creates a table from explicit coupons.
    pub fn with_coupons<S: AsRef<str>>(coupons: impl IntoIterator<Item = (S, Coupon)>) -> Self {
        Self {
            coupons: coupons
                .into_iter()
                .map(|(code, coupon)| (code.as_ref().to_uppercase(), coupon))
                .collect(),
        }
    }

    fn lookup(&self, code: &str, now: DateTime<Utc>) -> Option<&Coupon> {
        if code.trim().is_empty() {
            return None;
        }
        self.coupons
            .get(&code.to_uppercase())
            .filter(|c| c.is_valid_at(now))
    }

    /// Returns the coupons still valid, sorted by code.
    pub fn valid_coupons(&self) -> Vec<(String, Coupon)> {
        let now = Utc::now();
        let mut valid: Vec<_> = self
            .coupons
            .iter()
            .filter(|(_, c)| c.is_valid_at(now))
            .map(|(code, c)| (code.clone(), *c))
            .collect();
        valid.sort_by(|a, b| a.0.cmp(&b.0));
        valid
    }
}

impl Default for CouponDiscount {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountCalculator for CouponDiscount {
    fn calculate(&self, total: Money, coupon: Option<&str>) -> Money {
        let Some(coupon) = coupon.and_then(|code| self.lookup(code, Utc::now())) else {
            return Money::zero();
        };
        if total < coupon.minimum {
            return Money::zero();
        }
        total.percentage(coupon.percent)
    }

    fn validate_coupon(&self, code: &str) -> bool {
        self.lookup(code, Utc::now()).is_some()
    }

    fn description(&self) -> String {
        "Promotional coupon".to_string()
    }
}
