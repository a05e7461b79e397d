//! Acquirer decision sources for card payments.

use common::Money;
use rand::Rng;

/// Decides whether the card acquirer approves a transaction.
pub trait AcquirerDecision: Send + Sync {
    /// Returns true if the acquirer approves a charge of `amount`.
    fn approve(&self, amount: Money) -> bool;
}

/// Simulated acquirer approving a fixed share of transactions at random.
#[derive(Debug, Clone, Copy)]
pub struct RandomAcquirer {
    approval_rate: f64,
}

impl RandomAcquirer {
    /// Approval rate used when none is configured.
    pub const DEFAULT_APPROVAL_RATE: f64 = 0.9;

    /// Creates an acquirer approving `approval_rate` of charges, clamped to [0, 1].
    pub fn new(approval_rate: f64) -> Self {
        let approval_rate = if approval_rate.is_nan() {
            Self::DEFAULT_APPROVAL_RATE
        } else {
            approval_rate.clamp(0.0, 1.0)
        };
        Self { approval_rate }
    }

    pub fn approval_rate(&self) -> f64 {
        self.approval_rate
    }
}

impl Default for RandomAcquirer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_APPROVAL_RATE)
    }
}

impl AcquirerDecision for RandomAcquirer {
    fn approve(&self, _amount: Money) -> bool {
        rand::thread_rng().gen_bool(self.approval_rate)
    }
}

/// Acquirer that always returns the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedAcquirer {
    approve: bool,
}

impl FixedAcquirer {
    pub fn approving() -> Self {
        Self { approve: true }
    }

    pub fn declining() -> Self {
        Self { approve: false }
    }
}

impl AcquirerDecision for FixedAcquirer {
    fn approve(&self, _amount: Money) -> bool {
        self.approve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_acquirer() {
        assert!(FixedAcquirer::approving().approve(Money::from_cents(100)));
        assert!(!FixedAcquirer::declining().approve(Money::from_cents(100)));
    }

    #[test]
    fn test_random_acquirer_extremes_are_deterministic() {
        let always = RandomAcquirer::new(1.0);
        let never = RandomAcquirer::new(0.0);
        for _ in 0..100 {
            assert!(always.approve(Money::from_cents(100)));
            assert!(!never.approve(Money::from_cents(100)));
        }
    }

    #[test]
    fn test_random_acquirer_clamps_rate() {
        assert_eq!(RandomAcquirer::new(3.0).approval_rate(), 1.0);
        assert_eq!(RandomAcquirer::new(-1.0).approval_rate(), 0.0);
        assert_eq!(RandomAcquirer::new(f64::NAN).approval_rate(), 0.9);
        assert_eq!(RandomAcquirer::default().approval_rate(), 0.9);
    }
}
