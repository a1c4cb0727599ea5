//! Driving port for ride mutations.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Ride, RideDraft, RideId, RidePatch};

/// Request to post a ride. The owner is always the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRideRequest {
    pub caller: Caller,
    pub draft: RideDraft,
}

/// Request to patch a ride the caller owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRideRequest {
    pub caller: Caller,
    pub ride_id: RideId,
    pub patch: RidePatch,
}

/// Request to delete a ride the caller owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRideRequest {
    pub caller: Caller,
    pub ride_id: RideId,
}

/// Driving port for ride write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RidesCommand: Send + Sync {
    /// Validate and store a new active ride.
    ///
    /// Fails with `Unauthorized` without a caller and `InvalidRequest` on the
    /// first failing validation rule.
    async fn create_ride(&self, request: CreateRideRequest) -> Result<Ride, Error>;

    /// Apply an owner's patch as given.
    ///
    /// Fails with `NotFound` for unknown rides and `Forbidden` for anyone but
    /// the owner.
    async fn update_ride(&self, request: UpdateRideRequest) -> Result<Ride, Error>;

    /// Hard-delete a ride. Seat requests against it are left in place.
    async fn delete_ride(&self, request: DeleteRideRequest) -> Result<(), Error>;
}
