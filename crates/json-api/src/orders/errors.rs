//! Order Errors

use salvo::http::StatusError;

use shopease_app::domain::{carts::CheckoutError, orders::OrdersServiceError};

use crate::{carts, extensions::internal_error};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        invalid if invalid.is_invalid_input() => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        other => internal_error("failed to process order", &other),
    }
}

pub(crate) fn checkout_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::Cart(source) => carts::into_status_error(source),
        CheckoutError::Order(source) => into_status_error(source),
    }
}
