//! Identifier allocation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic identifier generator, starting at 1.
///
/// Each store owns its own sequence, so identifiers are unique per store
/// instance rather than process-wide.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Allocates the next identifier.
    pub fn next_id<T: From<u64>>(&self) -> T {
        T::from(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use common::OrderId;

    use super::*;

    #[test]
    fn starts_at_one_and_increments() {
        let seq = IdSequence::new();
        let first: OrderId = seq.next_id();
        let second: OrderId = seq.next_id();
        assert_eq!(first, OrderId::new(1));
        assert_eq!(second, OrderId::new(2));
    }

    #[tokio::test]
    async fn concurrent_allocation_is_unique() {
        let seq = Arc::new(IdSequence::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(tokio::spawn(async move {
                (0..100).map(|_| seq.next_id::<u64>()).collect::<Vec<_>>()
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
    }
}
