//! Reviews Data

use crate::domain::reviews::{errors::ReviewsServiceError, records::ReviewStatus};

/// Longest accepted comment, in characters after trimming.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// A review as submitted by a shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: String,
    pub rating: i64,
    pub comment: String,
}

impl NewReview {
    /// Validated rating and trimmed comment.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewsServiceError::InvalidRating`] outside 1 to 5 and
    /// [`ReviewsServiceError::InvalidComment`] for blank or overlong comments.
    pub fn validated(&self) -> Result<(u8, String), ReviewsServiceError> {
        let rating = u8::try_from(self.rating)
            .ok()
            .filter(|rating| (1..=5).contains(rating))
            .ok_or(ReviewsServiceError::InvalidRating(self.rating))?;

        let comment = self.comment.trim();
        let length = comment.chars().count();

        if length == 0 || length > MAX_COMMENT_CHARS {
            return Err(ReviewsServiceError::InvalidComment);
        }

        Ok((rating, comment.to_owned()))
    }
}

/// An admin's verdict on a pending review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    Approve,
    Reject,
}

impl ModerationDecision {
    pub fn status(self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Reject => ReviewStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn review(rating: i64, comment: &str) -> NewReview {
        NewReview {
            product_id: "p".to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() -> TestResult {
        assert_eq!(review(1, "ok").validated()?.0, 1);
        assert_eq!(review(5, "ok").validated()?.0, 5);

        for rating in [0, 6, -1, 300] {
            let result = review(rating, "ok").validated();

            assert!(
                matches!(result, Err(ReviewsServiceError::InvalidRating(r)) if r == rating),
                "expected {rating} to be rejected, got {result:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn comment_is_trimmed_and_bounded() -> TestResult {
        assert_eq!(review(4, "  Lovely fabric \n").validated()?.1, "Lovely fabric");

        assert!(
            matches!(
                review(4, "   ").validated(),
                Err(ReviewsServiceError::InvalidComment)
            ),
            "blank comment should be rejected"
        );

        let longest = "é".repeat(MAX_COMMENT_CHARS);
        assert_eq!(review(4, &longest).validated()?.1.chars().count(), MAX_COMMENT_CHARS);

        assert!(
            matches!(
                review(4, &format!("{longest}x")).validated(),
                Err(ReviewsServiceError::InvalidComment)
            ),
            "overlong comment should be rejected"
        );

        Ok(())
    }
}
