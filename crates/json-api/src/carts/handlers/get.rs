//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopease::cart::{CartSummary, LineItem};

use crate::{
    carts::errors::into_status_error,
    extensions::*,
    money::{self, TotalsResponse},
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines in the order they were added
    pub lines: Vec<CartLineResponse>,

    /// Derived totals
    pub totals: TotalsResponse,

    /// Sum of line quantities
    pub item_count: u64,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            totals: TotalsResponse::from(&summary.totals),
            item_count: summary.item_count,
            lines: summary.lines.iter().map(CartLineResponse::from).collect(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Catalog identifier of the product
    pub product_id: String,

    /// Product name when it was added
    pub name: String,

    /// Discounted unit price
    pub unit_price: String,

    /// Quantity, at least one
    pub quantity: u32,

    /// Unit price times quantity
    pub line_total: String,

    /// First product image, if any
    pub image: Option<String>,
}

impl From<&LineItem> for CartLineResponse {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price: money::amount(line.unit_price()),
            quantity: line.quantity,
            line_total: money::amount(line.line_total()),
            image: line.product.images.first().cloned(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the signed-in shopper's cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(shopper.user_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
