//! Moderate Review Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopease_app::domain::reviews::ModerationDecision;

use crate::{
    extensions::*,
    reviews::{ReviewResponse, errors::into_status_error},
    state::State,
};

/// Moderation verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for ModerationDecision {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => ModerationDecision::Approve,
            Decision::Reject => ModerationDecision::Reject,
        }
    }
}

/// Moderate Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ModerateReviewRequest {
    pub decision: Decision,
}

/// Moderate Review Handler
#[endpoint(
    tags("admin"),
    summary = "Moderate Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Review moderated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "reviews.moderate",
    skip(review, json, depot),
    fields(review_uuid = tracing::field::Empty, decision = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    json: JsonBody<ModerateReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_403()?;

    let review = review.into_inner();
    let decision = json.into_inner().decision;

    let span = tracing::Span::current();

    span.record("review_uuid", tracing::field::display(review));
    span.record("decision", tracing::field::debug(decision));

    let moderated = state
        .app
        .reviews
        .moderate_review(review.into(), decision.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(review_uuid = %review, status = moderated.status.as_str(), "moderated review");

    Ok(Json(moderated.into()))
}
