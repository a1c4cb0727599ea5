//! Port abstraction for review persistence.
use async_trait::async_trait;

use crate::domain::{NewReview, Review, ReviewId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

/// Port for immutable reviews. Listings are newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review and assign the next identifier.
    async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError>;

    /// Remove a review. Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: ReviewId) -> Result<bool, ReviewRepositoryError>;

    /// Fetch a review by identifier.
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Reviews written by `reviewer`.
    async fn list_by_reviewer(&self, reviewer: UserId)
    -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Reviews received by `reviewee`.
    async fn list_by_reviewee(&self, reviewee: UserId)
    -> Result<Vec<Review>, ReviewRepositoryError>;
}
