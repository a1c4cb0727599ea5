//! Ride lifecycle service.
//!
//! Implements the ride driving ports: posting, owner edits and deletion, and
//! the public listings joined with owner summaries.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateRideRequest, DeleteRideRequest, RideRepository, RidesCommand, RidesQuery,
    UpdateRideRequest, UserRepository,
};
use crate::domain::service_support::{lookup_summary, map_ride_repository_error, validation_error};
use crate::domain::{
    Caller, DEFAULT_MAX_SEATS, Error, NewRide, Ride, RideFilter, RideId, RideWithOwner, UserId,
};

/// Ride service implementing the ride command and query ports.
#[derive(Clone)]
pub struct RideService<U, R> {
    user_repo: Arc<U>,
    ride_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    max_seats: u32,
}

impl<U, R> RideService<U, R> {
    /// Create a service allowing up to [`DEFAULT_MAX_SEATS`] seats per ride.
    pub fn new(user_repo: Arc<U>, ride_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            ride_repo,
            clock,
            max_seats: DEFAULT_MAX_SEATS,
        }
    }

    /// Override the upper bound on seats accepted at creation.
    pub fn with_max_seats(mut self, max_seats: u32) -> Self {
        self.max_seats = max_seats;
        self
    }
}

impl<U, R> RideService<U, R>
where
    U: UserRepository,
    R: RideRepository,
{
    async fn find_ride(&self, ride_id: RideId) -> Result<Ride, Error> {
        self.ride_repo
            .find_by_id(ride_id)
            .await
            .map_err(map_ride_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride {ride_id} not found")))
    }

    /// Load a ride and check that `owner` posted it.
    async fn find_owned_ride(&self, ride_id: RideId, owner: UserId) -> Result<Ride, Error> {
        let ride = self.find_ride(ride_id).await?;
        if ride.user_id != owner {
            warn!(ride_id = %ride_id, caller = %owner, "non-owner tried to modify ride");
            return Err(Error::forbidden("only the ride owner can modify this ride"));
        }
        Ok(ride)
    }

    async fn with_owner(&self, ride: Ride) -> Result<RideWithOwner, Error> {
        let user = lookup_summary(self.user_repo.as_ref(), ride.user_id).await?;
        Ok(RideWithOwner { ride, user })
    }
}

#[async_trait]
impl<U, R> RidesCommand for RideService<U, R>
where
    U: UserRepository,
    R: RideRepository,
{
    async fn create_ride(&self, request: CreateRideRequest) -> Result<Ride, Error> {
        let owner = request.caller.require()?;
        let new_ride = NewRide::validate(request.draft, owner, self.max_seats, self.clock.utc())
            .map_err(|err| {
                let field = err.field();
                validation_error(err, field)
            })?;

        let ride = self
            .ride_repo
            .create(new_ride)
            .await
            .map_err(map_ride_repository_error)?;
        info!(ride_id = %ride.id, owner = %owner, seats = ride.available_seats, "ride posted");
        Ok(ride)
    }

    async fn update_ride(&self, request: UpdateRideRequest) -> Result<Ride, Error> {
        let caller = request.caller.require()?;
        self.find_owned_ride(request.ride_id, caller).await?;

        let ride = self
            .ride_repo
            .update(request.ride_id, request.patch)
            .await
            .map_err(map_ride_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride {} not found", request.ride_id)))?;
        info!(ride_id = %ride.id, status = ?ride.status, "ride updated");
        Ok(ride)
    }

    async fn delete_ride(&self, request: DeleteRideRequest) -> Result<(), Error> {
        let caller = request.caller.require()?;
        self.find_owned_ride(request.ride_id, caller).await?;

        let deleted = self
            .ride_repo
            .delete(request.ride_id)
            .await
            .map_err(map_ride_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!(
                "ride {} not found",
                request.ride_id
            )));
        }
        info!(ride_id = %request.ride_id, "ride deleted");
        Ok(())
    }
}

#[async_trait]
impl<U, R> RidesQuery for RideService<U, R>
where
    U: UserRepository,
    R: RideRepository,
{
    async fn list_rides(&self, filter: RideFilter) -> Result<Vec<RideWithOwner>, Error> {
        let rides = self
            .ride_repo
            .list(&filter)
            .await
            .map_err(map_ride_repository_error)?;
        debug!(count = rides.len(), "rides listed");

        let mut listed = Vec::with_capacity(rides.len());
        for ride in rides {
            listed.push(self.with_owner(ride).await?);
        }
        Ok(listed)
    }

    async fn get_ride(&self, ride_id: RideId) -> Result<RideWithOwner, Error> {
        let ride = self.find_ride(ride_id).await?;
        self.with_owner(ride).await
    }

    async fn list_my_rides(&self, caller: Caller) -> Result<Vec<Ride>, Error> {
        let owner = caller.require()?;
        self.ride_repo
            .list_by_owner(owner)
            .await
            .map_err(map_ride_repository_error)
    }
}

#[cfg(test)]
#[path = "ride_service_tests.rs"]
mod tests;
