//! Review Errors

use salvo::http::StatusError;

use shopease_app::domain::reviews::ReviewsServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        invalid @ (ReviewsServiceError::InvalidRating(_) | ReviewsServiceError::InvalidComment) => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        other @ (ReviewsServiceError::Catalog(_)
        | ReviewsServiceError::InvalidData(_)
        | ReviewsServiceError::Store(_)) => internal_error("failed to process review", &other),
    }
}
