//! Order domain logic
//!
//! The status machine plus the two orchestration services built on it:
//! checkout (stock reservation and order creation) and transitions (the
//! single write path for order status).

pub mod checkout;
pub mod status;
pub mod transition;

pub use checkout::{CheckoutOutcome, CheckoutService};
pub use status::{OrderStatus, TransitionError};
pub use transition::{TransitionOutcome, TransitionService};
