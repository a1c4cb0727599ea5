//! Driving port for writing reviews.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Review, ReviewDraft};

/// Review another participant of a ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewRequest {
    pub caller: Caller,
    pub draft: ReviewDraft,
}

/// Driving port for the rating aggregator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsCommand: Send + Sync {
    /// Store a review and fold its rating into the reviewee's average.
    async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, Error>;
}
