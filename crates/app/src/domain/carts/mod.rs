//! Carts

pub mod errors;
mod service;
mod store;

pub use errors::{CartsServiceError, CheckoutError};
pub use service::*;
pub use store::PgCartStore;
