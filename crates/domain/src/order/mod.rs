//! Order aggregate and its status machine.

mod aggregate;
mod state;

pub use aggregate::Order;
pub use state::OrderStatus;
