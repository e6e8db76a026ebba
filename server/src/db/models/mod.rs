//! Database models

pub mod chat;
pub mod order;
pub mod product;
pub mod record_link;
pub mod verification;

pub use chat::ChatMessage;
pub use order::{
    CustomerIdentity, Order, OrderCreate, OrderFilter, OrderItem, OrderSortKey, SortDirection,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use verification::VerificationCode;
