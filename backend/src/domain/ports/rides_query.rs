//! Driving port for ride listings.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Ride, RideFilter, RideId, RideWithOwner};

/// Driving port for ride read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RidesQuery: Send + Sync {
    /// Rides matching `filter`, latest departure first, each joined with its
    /// owner's summary.
    async fn list_rides(&self, filter: RideFilter) -> Result<Vec<RideWithOwner>, Error>;

    /// A single ride with its owner's summary.
    async fn get_ride(&self, ride_id: RideId) -> Result<RideWithOwner, Error>;

    /// The caller's own rides in every status.
    async fn list_my_rides(&self, caller: Caller) -> Result<Vec<Ride>, Error>;
}
