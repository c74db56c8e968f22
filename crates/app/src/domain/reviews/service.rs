//! Reviews service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use serde_json::Map;
use tracing::{info, warn};

use crate::{
    auth::Identity,
    documents::{DocumentStore, Filter, NewDocument, kinds},
    domain::{
        catalog::CatalogService,
        reviews::{
            data::{ModerationDecision, NewReview},
            errors::ReviewsServiceError,
            records::{ReviewBody, ReviewRecord, ReviewStatus, ReviewUuid},
        },
    },
};

#[derive(Clone)]
pub struct DocumentReviewsService {
    documents: Arc<dyn DocumentStore>,
    catalog: Arc<dyn CatalogService>,
}

impl fmt::Debug for DocumentReviewsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentReviewsService")
            .finish_non_exhaustive()
    }
}

impl DocumentReviewsService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, catalog: Arc<dyn CatalogService>) -> Self {
        Self { documents, catalog }
    }
}

#[async_trait]
impl ReviewsService for DocumentReviewsService {
    #[tracing::instrument(
        name = "reviews.submit",
        skip(self, author, review),
        fields(product = %review.product_id),
        err
    )]
    async fn submit_review(
        &self,
        author: &Identity,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let (rating, comment) = review.validated()?;

        let product = self.catalog.get_product(&review.product_id).await?;

        let body = ReviewBody {
            product_id: product.id,
            user_id: author.user_id,
            author_name: author.name.clone(),
            rating,
            comment,
            status: ReviewStatus::Pending,
        };

        let created = self
            .documents
            .create(NewDocument::new(kinds::REVIEW, &body)?)
            .await?;

        ReviewRecord::try_from(&created)
    }

    async fn list_reviews(&self, product: &str) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let filter = Filter::of_kind(kinds::REVIEW)
            .eq("productId", product)
            .eq("status", ReviewStatus::Approved.as_str());

        let documents = self.documents.fetch(filter).await?;

        let reviews = documents
            .iter()
            .filter_map(|document| match ReviewRecord::try_from(document) {
                Ok(review) => Some(review),
                Err(error) => {
                    warn!(review = %document.id, "skipping invalid review: {error}");
                    None
                }
            })
            .collect();

        Ok(reviews)
    }

    #[tracing::instrument(name = "reviews.moderate", skip(self), err)]
    async fn moderate_review(
        &self,
        review: ReviewUuid,
        decision: ModerationDecision,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let current = self.documents.get(review.into_uuid()).await?;

        if !current.is_kind(kinds::REVIEW) {
            return Err(ReviewsServiceError::NotFound);
        }

        let status = decision.status();

        let mut fields = Map::new();
        fields.insert("status".to_owned(), serde_json::to_value(status)?);

        let patched = self.documents.patch(review.into_uuid(), fields).await?;

        info!(status = status.as_str(), "review moderated");

        ReviewRecord::try_from(&patched)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Store a pending review for an existing product.
    async fn submit_review(
        &self,
        author: &Identity,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Approved reviews of `product`, newest first.
    async fn list_reviews(&self, product: &str) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    /// Approve or reject a review.
    async fn moderate_review(
        &self,
        review: ReviewUuid,
        decision: ModerationDecision,
    ) -> Result<ReviewRecord, ReviewsServiceError>;
}
