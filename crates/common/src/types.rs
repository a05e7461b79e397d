use serde::{Deserialize, Serialize};

/// Declares a sequence-backed identifier newtype.
///
/// Identifiers are allocated by the owning store and are never zero.
macro_rules! sequence_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from a raw sequence value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw sequence value.
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

sequence_id!(
    /// Unique identifier for a catalog product.
    ProductId
);

sequence_id!(
    /// Unique identifier for a customer.
    CustomerId
);

sequence_id!(
    /// Unique identifier for a shopping cart.
    CartId
);

sequence_id!(
    /// Identifier of a line inside a cart, unique within that cart.
    CartItemId
);

sequence_id!(
    /// Unique identifier for an order.
    OrderId
);

sequence_id!(
    /// Unique identifier for a payment attempt.
    PaymentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_preserves_raw_value() {
        let id = ProductId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(ProductId::from(42), id);
    }

    #[test]
    fn id_display_is_raw_number() {
        assert_eq!(OrderId::new(7).to_string(), "7");
    }

    #[test]
    fn id_serializes_transparently() {
        let id = CustomerId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let back: CustomerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
