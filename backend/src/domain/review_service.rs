//! Reviews and the reviewee rating aggregate.
//!
//! Each new review folds its rating into the reviewee's stored average with
//! [`RatingSummary::record`](crate::domain::RatingSummary::record), applied by
//! the store against the current record rather than a copy read earlier. If
//! that update fails the stored review is withdrawn again. Averages
//! are whole stars, so the stored value can drift from the true mean of all
//! ratings received.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreateReviewRequest, RideRepository, ReviewRepository, ReviewsCommand, ReviewsQuery,
    UserRepository,
};
use crate::domain::service_support::{
    lookup_summary, map_review_repository_error, map_ride_repository_error,
    map_user_repository_error, validation_error,
};
use crate::domain::{
    Error, NewReview, Rating, Review, ReviewWithReviewer, User, UserId, UserPatch,
};

/// Review service implementing the review command and query ports.
#[derive(Clone)]
pub struct ReviewService<U, R, V> {
    user_repo: Arc<U>,
    ride_repo: Arc<R>,
    review_repo: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<U, R, V> ReviewService<U, R, V> {
    /// Create a new review service.
    pub fn new(
        user_repo: Arc<U>,
        ride_repo: Arc<R>,
        review_repo: Arc<V>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            ride_repo,
            review_repo,
            clock,
        }
    }
}

impl<U, R, V> ReviewService<U, R, V>
where
    U: UserRepository,
    R: RideRepository,
    V: ReviewRepository,
{
    async fn find_user(&self, user_id: UserId) -> Result<Option<User>, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)
    }

    /// Remove a stored review whose rating could not be recorded.
    async fn withdraw(&self, review: &Review) {
        match self.review_repo.delete(review.id).await {
            Ok(_) => {
                warn!(review_id = %review.id, "review withdrawn after rating update failed");
            }
            Err(err) => {
                error!(review_id = %review.id, error = %err, "review could not be withdrawn");
            }
        }
    }
}

#[async_trait]
impl<U, R, V> ReviewsCommand for ReviewService<U, R, V>
where
    U: UserRepository,
    R: RideRepository,
    V: ReviewRepository,
{
    async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, Error> {
        let reviewer = request.caller.require()?;
        let draft = request.draft;
        let rating = Rating::new(draft.rating).map_err(|err| validation_error(err, "rating"))?;

        let reviewee = self
            .find_user(draft.reviewee_id)
            .await?
            .ok_or_else(|| Error::not_found("reviewee not found"))?;
        let ride = self
            .ride_repo
            .find_by_id(draft.ride_id)
            .await
            .map_err(map_ride_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride {} not found", draft.ride_id)))?;

        // Either side of the review must have posted the ride.
        if reviewer != ride.user_id && reviewee.id != ride.user_id {
            warn!(ride_id = %ride.id, reviewer = %reviewer, reviewee = %reviewee.id, "review from outside the ride");
            return Err(Error::forbidden(
                "reviews must involve the ride owner",
            ));
        }

        let review = self
            .review_repo
            .create(NewReview {
                ride_id: ride.id,
                reviewer_id: reviewer,
                reviewee_id: reviewee.id,
                rating,
                comment: draft.comment.filter(|comment| !comment.trim().is_empty()),
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_review_repository_error)?;

        let updated = match self
            .user_repo
            .update(reviewee.id, UserPatch::record_rating(rating))
            .await
        {
            Ok(updated) => updated,
            Err(err) => {
                self.withdraw(&review).await;
                return Err(map_user_repository_error(err));
            }
        };
        match updated {
            Some(user) => info!(
                review_id = %review.id,
                reviewee = %reviewee.id,
                rating = rating.get(),
                avg_rating = user.rating.avg_rating,
                total_reviews = user.rating.total_reviews,
                "review recorded"
            ),
            None => {
                warn!(reviewee = %reviewee.id, "reviewee vanished before the rating was recorded");
            }
        }
        Ok(review)
    }
}

#[async_trait]
impl<U, R, V> ReviewsQuery for ReviewService<U, R, V>
where
    U: UserRepository,
    R: RideRepository,
    V: ReviewRepository,
{
    async fn list_for_reviewee(
        &self,
        reviewee_id: UserId,
    ) -> Result<Vec<ReviewWithReviewer>, Error> {
        if self.find_user(reviewee_id).await?.is_none() {
            return Err(Error::not_found(format!("user {reviewee_id} not found")));
        }
        let reviews = self
            .review_repo
            .list_by_reviewee(reviewee_id)
            .await
            .map_err(map_review_repository_error)?;

        let mut listed = Vec::with_capacity(reviews.len());
        for review in reviews {
            let reviewer = lookup_summary(self.user_repo.as_ref(), review.reviewer_id).await?;
            listed.push(ReviewWithReviewer { review, reviewer });
        }
        Ok(listed)
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
