//! Cart
//!
//! Every route acts on the signed-in shopper's own cart.

mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
