//! Driving port for seat request listings.

use async_trait::async_trait;

use crate::domain::{Caller, Error, RideId, RideRequestWithRide, RideRequestWithUser};

/// Driving port for seat request read operations. Listings are newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRequestsQuery: Send + Sync {
    /// Requests against a ride, for its owner only.
    async fn list_for_ride(
        &self,
        caller: Caller,
        ride_id: RideId,
    ) -> Result<Vec<RideRequestWithUser>, Error>;

    /// Requests the caller has made, joined with the ride when it still
    /// exists.
    async fn list_mine(&self, caller: Caller) -> Result<Vec<RideRequestWithRide>, Error>;
}
