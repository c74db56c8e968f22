//! Reviews

pub mod data;
pub mod errors;
pub mod records;
mod service;

pub use data::{ModerationDecision, NewReview};
pub use errors::ReviewsServiceError;
pub use records::{ReviewRecord, ReviewStatus, ReviewUuid};
pub use service::*;
