//! Seat request state machine.
//!
//! Requests move from `pending` to `accepted` or `rejected` at the ride
//! owner's say. Accepting takes a seat from the ride; a ride with no seats
//! left stays at zero and the acceptance still succeeds.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreateSeatRequest, DecideSeatRequest, RideRepository, RideRequestRepository,
    RideRequestsCommand, RideRequestsQuery, UserRepository,
};
use crate::domain::service_support::{
    consume_seat, lookup_summary, map_ride_repository_error, map_ride_request_repository_error,
};
use crate::domain::{
    Caller, DecisionPolicy, Error, NewRideRequest, RequestDecision, Ride, RideId, RideRequest,
    RideRequestId, RideRequestWithRide, RideRequestWithUser,
};

/// Seat request service implementing the request command and query ports.
#[derive(Clone)]
pub struct RideRequestService<U, R, Q> {
    user_repo: Arc<U>,
    ride_repo: Arc<R>,
    request_repo: Arc<Q>,
    clock: Arc<dyn Clock>,
    policy: DecisionPolicy,
}

impl<U, R, Q> RideRequestService<U, R, Q> {
    /// Create a service with the permissive decision policy.
    pub fn new(
        user_repo: Arc<U>,
        ride_repo: Arc<R>,
        request_repo: Arc<Q>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            ride_repo,
            request_repo,
            clock,
            policy: DecisionPolicy::default(),
        }
    }

    /// Choose how decisions on already decided requests are treated.
    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<U, R, Q> RideRequestService<U, R, Q>
where
    U: UserRepository,
    R: RideRepository,
    Q: RideRequestRepository,
{
    async fn find_ride(&self, ride_id: RideId) -> Result<Ride, Error> {
        self.ride_repo
            .find_by_id(ride_id)
            .await
            .map_err(map_ride_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride {ride_id} not found")))
    }

    async fn find_request(&self, request_id: RideRequestId) -> Result<RideRequest, Error> {
        self.request_repo
            .find_by_id(request_id)
            .await
            .map_err(map_ride_request_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride request {request_id} not found")))
    }

    /// Put a request back to the status it had before a decision whose seat
    /// update failed, so the caller's error leaves nothing half applied.
    async fn restore_status(&self, previous: &RideRequest) {
        match self
            .request_repo
            .update_status(previous.id, previous.status)
            .await
        {
            Ok(_) => {
                warn!(request_id = %previous.id, status = ?previous.status, "decision rolled back after seat update failed");
            }
            Err(err) => {
                error!(request_id = %previous.id, error = %err, "decision could not be rolled back");
            }
        }
    }
}

#[async_trait]
impl<U, R, Q> RideRequestsCommand for RideRequestService<U, R, Q>
where
    U: UserRepository,
    R: RideRepository,
    Q: RideRequestRepository,
{
    async fn create_request(&self, request: CreateSeatRequest) -> Result<RideRequest, Error> {
        let requester = request.caller.require()?;
        let ride = self.find_ride(request.ride_id).await?;
        if ride.user_id == requester {
            return Err(Error::invalid_request("cannot request your own ride"));
        }

        let created = self
            .request_repo
            .create_unique(NewRideRequest {
                ride_id: ride.id,
                user_id: requester,
                message: request.message.filter(|message| !message.trim().is_empty()),
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_ride_request_repository_error)?
            .ok_or_else(|| Error::invalid_request("you already requested this ride"))?;
        info!(request_id = %created.id, ride_id = %ride.id, requester = %requester, "seat requested");
        Ok(created)
    }

    async fn decide_request(&self, request: DecideSeatRequest) -> Result<RideRequest, Error> {
        let caller = request.caller.require()?;
        let seat_request = self.find_request(request.request_id).await?;
        let ride = self.find_ride(seat_request.ride_id).await?;
        if ride.user_id != caller {
            warn!(
                request_id = %seat_request.id,
                ride_id = %ride.id,
                caller = %caller,
                "non-owner tried to decide a seat request"
            );
            return Err(Error::forbidden("only the ride owner can decide requests"));
        }
        if !self.policy.allows(seat_request.status) {
            return Err(Error::invalid_request(
                "ride request has already been decided",
            ));
        }

        let decided = self
            .request_repo
            .update_status(seat_request.id, request.decision.into())
            .await
            .map_err(map_ride_request_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride request {} not found", seat_request.id)))?;
        info!(
            request_id = %decided.id,
            ride_id = %ride.id,
            previous = ?seat_request.status,
            status = ?decided.status,
            "seat request decided"
        );

        if request.decision == RequestDecision::Accepted {
            match consume_seat(self.ride_repo.as_ref(), ride.id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!(ride_id = %ride.id, "ride vanished before its seat could be taken");
                }
                Err(err) => {
                    self.restore_status(&seat_request).await;
                    return Err(err);
                }
            }
        }
        Ok(decided)
    }
}

#[async_trait]
impl<U, R, Q> RideRequestsQuery for RideRequestService<U, R, Q>
where
    U: UserRepository,
    R: RideRepository,
    Q: RideRequestRepository,
{
    async fn list_for_ride(
        &self,
        caller: Caller,
        ride_id: RideId,
    ) -> Result<Vec<RideRequestWithUser>, Error> {
        let owner = caller.require()?;
        let ride = self.find_ride(ride_id).await?;
        if ride.user_id != owner {
            return Err(Error::forbidden(
                "only the ride owner can view its requests",
            ));
        }

        let requests = self
            .request_repo
            .list_by_ride(ride_id)
            .await
            .map_err(map_ride_request_repository_error)?;
        let mut listed = Vec::with_capacity(requests.len());
        for request in requests {
            let user = lookup_summary(self.user_repo.as_ref(), request.user_id).await?;
            listed.push(RideRequestWithUser { request, user });
        }
        Ok(listed)
    }

    async fn list_mine(&self, caller: Caller) -> Result<Vec<RideRequestWithRide>, Error> {
        let requester = caller.require()?;
        let requests = self
            .request_repo
            .list_by_requester(requester)
            .await
            .map_err(map_ride_request_repository_error)?;

        let mut listed = Vec::with_capacity(requests.len());
        for request in requests {
            let ride = self
                .ride_repo
                .find_by_id(request.ride_id)
                .await
                .map_err(map_ride_repository_error)?;
            if ride.is_none() {
                warn!(request_id = %request.id, ride_id = %request.ride_id, "request refers to a deleted ride");
            }
            listed.push(RideRequestWithRide { request, ride });
        }
        Ok(listed)
    }
}

#[cfg(test)]
#[path = "ride_request_service_tests.rs"]
mod tests;
