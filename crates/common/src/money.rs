//! Monetary amounts in integer cents.

use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = R$10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a whole number of reais.
    pub const fn from_reais(reais: i64) -> Self {
        Self {
            cents: reais * 100,
        }
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole reais portion.
    pub fn reais(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after reais).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity, saturating at the `i64` bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }

    /// Scales the amount by `numerator / denominator`, rounding half away from zero.
    ///
    /// A zero denominator yields zero.
    pub fn scale(&self, numerator: i64, denominator: i64) -> Money {
        if denominator == 0 {
            return Money::zero();
        }
        let product = i128::from(self.cents) * i128::from(numerator);
        let denominator = i128::from(denominator);
        let half = denominator.abs() / 2;
        let rounded = if (product >= 0) == (denominator > 0) {
            (product.abs() + half) / denominator.abs()
        } else {
            -((product.abs() + half) / denominator.abs())
        };
        Money {
            cents: rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
        }
    }

    /// Returns `percent`% of this amount, rounded to the cent.
    pub fn percentage(&self, percent: u32) -> Money {
        self.scale(i64::from(percent), 100)
    }

    /// Returns the absolute difference between two amounts.
    pub fn abs_diff(&self, other: Money) -> Money {
        Money {
            cents: self.cents.saturating_sub(other.cents).saturating_abs(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-R${}.{:02}", self.reais().abs(), self.cents_part())
        } else {
            write!(f, "R${}.{:02}", self.reais(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_sub(rhs.cents),
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents = self.cents.saturating_add(rhs.cents);
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.cents = self.cents.saturating_sub(rhs.cents);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
        assert_eq!(money.reais(), 12);
        assert_eq!(money.cents_part(), 34);
    }

    #[test]
    fn test_money_from_reais() {
        assert_eq!(Money::from_reais(50).cents(), 5000);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "R$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "R$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-R$12.34");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply(3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(200);
        assert_eq!(c.cents(), 1300);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(Money::from_reais(100).percentage(10).cents(), 1000);
        // 3% of 0.50 = 1.5 cents
        assert_eq!(Money::from_cents(50).percentage(3).cents(), 2);
        // 2% of 0.10 = 0.2 cents
        assert_eq!(Money::from_cents(10).percentage(2).cents(), 0);
    }

    #[test]
    fn test_scale() {
        assert_eq!(Money::from_cents(1001).scale(3, 2).cents(), 1502);
        assert_eq!(Money::from_cents(-1001).scale(3, 2).cents(), -1502);
        assert_eq!(Money::from_cents(100).scale(1, 0), Money::zero());
    }

    #[test]
    fn test_sum_and_abs_diff() {
        let total: Money = [100, 250, 50].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 400);
        assert_eq!(
            Money::from_cents(100).abs_diff(Money::from_cents(101)),
            Money::from_cents(1)
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply(3).cents(), i64::MAX);
        assert_eq!((huge + huge + huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);
        assert_eq!(
            Money::from_cents(i64::MIN).abs_diff(Money::from_cents(1)).cents(),
            i64::MAX
        );

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MAX).scale(3, 1).cents(), i64::MAX);
    }

    #[test]
    fn test_money_predicates() {
        assert!(Money::from_cents(100).is_positive());
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(-100).is_negative());
    }
}
