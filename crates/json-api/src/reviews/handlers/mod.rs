//! Review Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod moderate;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopease_app::domain::reviews::ReviewRecord;

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    /// The unique identifier of the review
    pub uuid: Uuid,

    /// The reviewed product
    pub product_id: String,

    /// Display name of the reviewer
    pub author_name: String,

    /// Rating from 1 to 5
    pub rating: u8,

    /// Review text
    pub comment: String,

    /// Moderation status: pending, approved or rejected
    pub status: String,

    /// The date and time the review was submitted
    pub created_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into_uuid(),
            product_id: review.product_id,
            author_name: review.author_name,
            rating: review.rating,
            comment: review.comment,
            status: review.status.as_str().to_string(),
            created_at: review.created_at.to_string(),
        }
    }
}
