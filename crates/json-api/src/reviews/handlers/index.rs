//! List Reviews Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    reviews::{ReviewResponse, errors::into_status_error},
    state::State,
};

/// List Reviews Handler
///
/// Returns the approved reviews of a product, newest first.
#[endpoint(
    tags("reviews"),
    summary = "List Product Reviews",
    responses(
        (status_code = StatusCode::OK, description = "Approved reviews"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReviewResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .list_reviews(&product.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
