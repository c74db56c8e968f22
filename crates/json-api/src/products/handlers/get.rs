//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopease::products::ProductSnapshot;

use crate::{extensions::*, money, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price before discount, two decimal places
    pub price: String,

    /// Percentage discount, if any
    pub discount: Option<String>,

    /// Whether the product can be ordered
    pub in_stock: bool,

    /// Image references
    pub images: Vec<String>,
}

impl From<ProductSnapshot> for ProductResponse {
    fn from(product: ProductSnapshot) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: money::amount(product.price),
            discount: product.discount.map(|discount| discount.normalize().to_string()),
            in_stock: product.in_stock,
            images: product.images.into_vec(),
        }
    }
}

/// Get Product Handler
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .catalog
        .get_product(&product.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
