//! Review Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    auth::UserUuid,
    documents::Document,
    domain::reviews::errors::ReviewsServiceError,
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Body of a `review` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewBody {
    pub product_id: String,
    pub user_id: UserUuid,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub status: ReviewStatus,
}

/// Review Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub product_id: String,
    pub user_id: UserUuid,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub status: ReviewStatus,
    pub created_at: Timestamp,
}

impl TryFrom<&Document> for ReviewRecord {
    type Error = ReviewsServiceError;

    fn try_from(document: &Document) -> Result<Self, Self::Error> {
        let body: ReviewBody = document.decode()?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(document.id),
            product_id: body.product_id,
            user_id: body.user_id,
            author_name: body.author_name,
            rating: body.rating,
            comment: body.comment,
            status: body.status,
            created_at: document.created_at,
        })
    }
}
