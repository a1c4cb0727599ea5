//! Rides, their validated creation input, partial updates, and listing
//! filters.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RideId, UserId, UserSummary};

/// Default upper bound on seats offered when a ride is posted.
pub const DEFAULT_MAX_SEATS: u32 = 7;

/// Whether the owner is offering seats or looking for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideType {
    Offer,
    Request,
}

/// Lifecycle status of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

/// Error returned when parsing an unknown ride enum string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {input}")]
pub struct ParseRideEnumError {
    kind: &'static str,
    input: String,
}

impl FromStr for RideType {
    type Err = ParseRideEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer" => Ok(Self::Offer),
            "request" => Ok(Self::Request),
            other => Err(ParseRideEnumError {
                kind: "ride type",
                input: other.to_owned(),
            }),
        }
    }
}

impl FromStr for RideStatus {
    type Err = ParseRideEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseRideEnumError {
                kind: "ride status",
                input: other.to_owned(),
            }),
        }
    }
}

/// Validation errors for ride creation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RideValidationError {
    #[error("pickup location must not be empty")]
    EmptyPickup,
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("available seats must be between {min} and {max}")]
    SeatsOutOfRange { min: u32, max: u32 },
    #[error("price must not be negative")]
    NegativePrice,
}

impl RideValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPickup => "pickupLocation",
            Self::EmptyDestination => "destination",
            Self::SeatsOutOfRange { .. } => "availableSeats",
            Self::NegativePrice => "price",
        }
    }
}

/// Posted ride.
///
/// ## Invariants
/// - `available_seats` never goes below zero; accepting a request against a
///   full ride leaves it at zero.
/// - `price` is in minor currency units and never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: RideId,
    pub user_id: UserId,
    pub ride_type: RideType,
    pub pickup_location: String,
    pub destination: String,
    pub date_time: DateTime<Utc>,
    pub available_seats: u32,
    pub price: u32,
    pub notes: Option<String>,
    pub status: RideStatus,
    pub created_at: DateTime<Utc>,
}

/// Raw ride input as parsed by the request handler.
///
/// The owner is never part of the draft; it comes from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideDraft {
    pub ride_type: RideType,
    pub pickup_location: String,
    pub destination: String,
    pub date_time: DateTime<Utc>,
    pub available_seats: i64,
    pub price: i64,
    pub notes: Option<String>,
}

/// Validated ride ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRide {
    pub user_id: UserId,
    pub ride_type: RideType,
    pub pickup_location: String,
    pub destination: String,
    pub date_time: DateTime<Utc>,
    pub available_seats: u32,
    pub price: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewRide {
    /// Validate a draft for `owner`, reporting the first failing rule.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use rideshare::domain::{NewRide, RideDraft, RideType, RideValidationError, UserId};
    ///
    /// let draft = RideDraft {
    ///     ride_type: RideType::Offer,
    ///     pickup_location: "North Gate".to_owned(),
    ///     destination: "Airport".to_owned(),
    ///     date_time: Utc::now(),
    ///     available_seats: 9,
    ///     price: 1500,
    ///     notes: None,
    /// };
    /// let err = NewRide::validate(draft, UserId::new(1), 7, Utc::now()).expect_err("too many seats");
    /// assert_eq!(err, RideValidationError::SeatsOutOfRange { min: 1, max: 7 });
    /// ```
    pub fn validate(
        draft: RideDraft,
        owner: UserId,
        max_seats: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RideValidationError> {
        let pickup_location = draft.pickup_location.trim().to_owned();
        if pickup_location.is_empty() {
            return Err(RideValidationError::EmptyPickup);
        }
        let destination = draft.destination.trim().to_owned();
        if destination.is_empty() {
            return Err(RideValidationError::EmptyDestination);
        }
        let available_seats = u32::try_from(draft.available_seats)
            .ok()
            .filter(|seats| (1..=max_seats).contains(seats))
            .ok_or(RideValidationError::SeatsOutOfRange {
                min: 1,
                max: max_seats,
            })?;
        let price = u32::try_from(draft.price).map_err(|_| RideValidationError::NegativePrice)?;

        Ok(Self {
            user_id: owner,
            ride_type: draft.ride_type,
            pickup_location,
            destination,
            date_time: draft.date_time,
            available_seats,
            price,
            notes: draft.notes.filter(|notes| !notes.trim().is_empty()),
            created_at,
        })
    }
}

/// Partial update applied to a stored ride.
///
/// Owner-supplied updates are applied as given. The owner, identifier, and
/// creation time are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidePatch {
    pub ride_type: Option<RideType>,
    pub pickup_location: Option<String>,
    pub destination: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub available_seats: Option<u32>,
    pub price: Option<u32>,
    pub notes: Option<String>,
    pub status: Option<RideStatus>,
    /// Take one seat from whatever the stored count is at apply time.
    #[serde(skip)]
    pub consume_seat: bool,
}

impl RidePatch {
    /// Patch that takes one seat, saturating at zero.
    pub fn consume_seat() -> Self {
        Self {
            consume_seat: true,
            ..Self::default()
        }
    }

    /// Apply the patch in place.
    pub fn apply(self, ride: &mut Ride) {
        if let Some(ride_type) = self.ride_type {
            ride.ride_type = ride_type;
        }
        if let Some(pickup_location) = self.pickup_location {
            ride.pickup_location = pickup_location;
        }
        if let Some(destination) = self.destination {
            ride.destination = destination;
        }
        if let Some(date_time) = self.date_time {
            ride.date_time = date_time;
        }
        if let Some(available_seats) = self.available_seats {
            ride.available_seats = available_seats;
        }
        if let Some(price) = self.price {
            ride.price = price;
        }
        if let Some(notes) = self.notes {
            ride.notes = Some(notes);
        }
        if let Some(status) = self.status {
            ride.status = status;
        }
        if self.consume_seat {
            ride.available_seats = ride.available_seats.saturating_sub(1);
        }
    }
}

/// Listing filters. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideFilter {
    pub ride_type: Option<RideType>,
    /// Inclusive lower bound on departure.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on departure.
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the pickup location.
    pub pickup_location: Option<String>,
    /// Case-insensitive substring of the destination.
    pub destination: Option<String>,
    /// Minimum seats still available.
    pub available_seats: Option<u32>,
    pub status: Option<RideStatus>,
}

impl RideFilter {
    /// Whether `ride` passes every set criterion.
    pub fn matches(&self, ride: &Ride) -> bool {
        self.ride_type.is_none_or(|kind| ride.ride_type == kind)
            && self.date_from.is_none_or(|from| ride.date_time >= from)
            && self.date_to.is_none_or(|to| ride.date_time <= to)
            && self
                .pickup_location
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&ride.pickup_location, needle))
            && self
                .destination
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&ride.destination, needle))
            && self
                .available_seats
                .is_none_or(|min| ride.available_seats >= min)
            && self.status.is_none_or(|status| ride.status == status)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Listing order: latest departure first, then highest id.
pub fn by_departure_desc(a: &Ride, b: &Ride) -> Ordering {
    b.date_time.cmp(&a.date_time).then_with(|| b.id.cmp(&a.id))
}

/// Ride joined with its owner's public summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideWithOwner {
    #[serde(flatten)]
    pub ride: Ride,
    /// `None` when the owner record cannot be found.
    pub user: Option<UserSummary>,
}
