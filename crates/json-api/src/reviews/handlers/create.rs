//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopease_app::domain::reviews::NewReview;

use crate::{
    extensions::*,
    reviews::{ReviewResponse, errors::into_status_error},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    /// Rating from 1 to 5
    pub rating: i64,

    /// Review text, at most 1000 characters
    pub comment: String,
}

/// Create Review Handler
///
/// New reviews wait for moderation before they are listed.
#[endpoint(
    tags("reviews"),
    summary = "Submit Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid rating or comment"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(product, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_id = tracing::field::Empty,
        rating = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let author = depot.identity_or_401()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(author.user_id));
    span.record("product_id", tracing::field::display(&product));
    span.record("rating", request.rating);

    let review = state
        .app
        .reviews
        .submit_review(
            author,
            NewReview {
                product_id: product,
                rating: request.rating,
                comment: request.comment,
            },
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(review_uuid = %review.uuid, "review submitted");

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}
