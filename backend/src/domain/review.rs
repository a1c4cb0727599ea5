//! Reviews and the running rating kept on each user.
//!
//! The running average is recomputed from the previous rounded average on
//! every review rather than from a stored sum, so it can drift from the true
//! mean over many reviews. That is the documented behaviour and is kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReviewId, RideId, UserId, UserSummary};

/// Lowest accepted star rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted star rating.
pub const RATING_MAX: u8 = 5;

/// Validation errors for review input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("rating must be between {min} and {max}")]
    RatingOutOfRange { min: u8, max: u8 },
}

/// Star rating between [`RATING_MIN`] and [`RATING_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw rating.
    ///
    /// # Examples
    /// ```
    /// use rideshare::domain::Rating;
    ///
    /// assert_eq!(Rating::new(4).map(Rating::get), Ok(4));
    /// assert!(Rating::new(0).is_err());
    /// assert!(Rating::new(6).is_err());
    /// ```
    pub fn new(raw: i64) -> Result<Self, ReviewValidationError> {
        u8::try_from(raw)
            .ok()
            .filter(|value| (RATING_MIN..=RATING_MAX).contains(value))
            .map(Self)
            .ok_or(ReviewValidationError::RatingOutOfRange {
                min: RATING_MIN,
                max: RATING_MAX,
            })
    }

    /// Raw star count.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Rounded running average and review count stored on a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub avg_rating: u8,
    pub total_reviews: u32,
}

impl RatingSummary {
    /// Fold one more rating into the summary.
    ///
    /// Computes `round((avg * count + rating) / (count + 1))`, rounding halves
    /// up, and increments the count.
    ///
    /// # Examples
    /// ```
    /// use rideshare::domain::{Rating, RatingSummary};
    ///
    /// let first = RatingSummary::default().record(Rating::new(5).expect("valid"));
    /// assert_eq!((first.avg_rating, first.total_reviews), (5, 1));
    /// let second = first.record(Rating::new(3).expect("valid"));
    /// assert_eq!((second.avg_rating, second.total_reviews), (4, 2));
    /// ```
    #[must_use]
    pub fn record(self, rating: Rating) -> Self {
        let count = u64::from(self.total_reviews);
        let total = u64::from(self.avg_rating) * count + u64::from(rating.get());
        let next_count = count + 1;
        // floor(total / n + 1/2) without leaving integers
        let rounded = (2 * total + next_count) / (2 * next_count);
        Self {
            avg_rating: u8::try_from(rounded).unwrap_or(RATING_MAX),
            total_reviews: self.total_reviews.saturating_add(1),
        }
    }
}

/// Stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub ride_id: RideId,
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated review ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub ride_id: RideId,
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw review input as parsed by the request handler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub ride_id: RideId,
    pub reviewee_id: UserId,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Review joined with its author's public summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithReviewer {
    #[serde(flatten)]
    pub review: Review,
    /// `None` when the reviewer record cannot be found.
    pub reviewer: Option<UserSummary>,
}
