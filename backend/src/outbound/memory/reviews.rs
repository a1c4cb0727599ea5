//! `ReviewRepository` over the review arena.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{NewReview, Review, ReviewId, UserId};

use super::{InMemoryStore, sort_newest_first};

fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    sort_newest_first(&mut reviews, |review| (review.created_at, review.id.get()));
    reviews
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError> {
        Ok(self.reviews.write().await.insert_with(|id| Review {
            id: ReviewId::new(id),
            ride_id: review.ride_id,
            reviewer_id: review.reviewer_id,
            reviewee_id: review.reviewee_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }))
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, ReviewRepositoryError> {
        let removed = self.reviews.write().await.remove(id.get());
        debug!(review_id = %id, removed, "review removal attempted");
        Ok(removed)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewRepositoryError> {
        Ok(self.reviews.read().await.get(id.get()))
    }

    async fn list_by_reviewer(
        &self,
        reviewer: UserId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let reviews = self
            .reviews
            .read()
            .await
            .select(|review| review.reviewer_id == reviewer);
        Ok(newest_first(reviews))
    }

    async fn list_by_reviewee(
        &self,
        reviewee: UserId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let reviews = self
            .reviews
            .read()
            .await
            .select(|review| review.reviewee_id == reviewee);
        Ok(newest_first(reviews))
    }
}
