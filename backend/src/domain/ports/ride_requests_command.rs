//! Driving port for seat request mutations.

use async_trait::async_trait;

use crate::domain::{Caller, Error, RequestDecision, RideId, RideRequest, RideRequestId};

/// Request a seat on someone else's ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSeatRequest {
    pub caller: Caller,
    pub ride_id: RideId,
    pub message: Option<String>,
}

/// Owner's decision on a seat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecideSeatRequest {
    pub caller: Caller,
    pub request_id: RideRequestId,
    pub decision: RequestDecision,
}

/// Driving port for the seat request state machine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRequestsCommand: Send + Sync {
    /// Create a pending request.
    ///
    /// A user may request a given ride once, whatever became of an earlier
    /// request, and never their own ride.
    async fn create_request(&self, request: CreateSeatRequest) -> Result<RideRequest, Error>;

    /// Accept or reject a request on a ride the caller owns. Accepting takes
    /// one seat when any remain.
    async fn decide_request(&self, request: DecideSeatRequest) -> Result<RideRequest, Error>;
}
