//! Errors

use salvo::http::StatusError;
use tracing::warn;

use shopease::cart::CartError;
use shopease_app::domain::carts::CartsServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::Cart(invalid) if invalid.is_invalid_input() => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        CartsServiceError::Cart(CartError::Pricing(source)) => {
            StatusError::bad_request().brief(format!("Cart cannot be priced: {source}"))
        }
        CartsServiceError::Cart(CartError::Persistence(source)) => {
            warn!("failed to save cart: {source}");

            StatusError::service_unavailable().brief("Cart could not be saved, try again")
        }
        CartsServiceError::LockPoisoned => {
            warn!("cart lock is unavailable");

            StatusError::service_unavailable().brief("Cart is unavailable, try again")
        }
        other @ (CartsServiceError::Cart(_) | CartsServiceError::Catalog(_)) => {
            internal_error("failed to update cart", &other)
        }
    }
}
