//! Driving port for reading reviews.

use async_trait::async_trait;

use crate::domain::{Error, ReviewWithReviewer, UserId};

/// Driving port for review listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsQuery: Send + Sync {
    /// Reviews a user has received, newest first.
    async fn list_for_reviewee(&self, reviewee_id: UserId)
    -> Result<Vec<ReviewWithReviewer>, Error>;
}
