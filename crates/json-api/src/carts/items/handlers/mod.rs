//! Cart Item Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shopease::cart::Outcome;
use shopease_app::domain::carts::CartUpdate;

use crate::carts::get::CartResponse;

/// Cart Updated Response
///
/// `outcome` is `not_found` when the addressed line was not in the cart; the
/// cart is then returned unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUpdatedResponse {
    /// `applied` or `not_found`
    pub outcome: String,

    /// The cart after the change
    pub cart: CartResponse,
}

impl From<CartUpdate> for CartUpdatedResponse {
    fn from(update: CartUpdate) -> Self {
        let outcome = match update.outcome {
            Outcome::Applied => "applied",
            Outcome::NotFound => "not_found",
        };

        Self {
            outcome: outcome.to_string(),
            cart: update.summary.into(),
        }
    }
}
