//! Port abstraction for seat request persistence.
use async_trait::async_trait;

use crate::domain::{NewRideRequest, RideId, RideRequest, RideRequestId, RideRequestStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ride request repository adapters.
    pub enum RideRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ride request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ride request repository query failed: {message}",
    }
}

/// Port for seat requests. Listings are newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRequestRepository: Send + Sync {
    /// Insert a pending request and assign the next identifier.
    async fn create(
        &self,
        request: NewRideRequest,
    ) -> Result<RideRequest, RideRequestRepositoryError>;

    /// Insert a pending request unless `requester` already asked for the
    /// same ride, in any status. The check and the insert are one step, so
    /// two concurrent calls for the same pair store at most one request.
    ///
    /// Returns `None` when a request for the pair already exists.
    async fn create_unique(
        &self,
        request: NewRideRequest,
    ) -> Result<Option<RideRequest>, RideRequestRepositoryError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: RideRequestId,
    ) -> Result<Option<RideRequest>, RideRequestRepositoryError>;

    /// Requests made against `ride`.
    async fn list_by_ride(
        &self,
        ride: RideId,
    ) -> Result<Vec<RideRequest>, RideRequestRepositoryError>;

    /// Requests made by `requester`.
    async fn list_by_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<RideRequest>, RideRequestRepositoryError>;

    /// Overwrite a request's status. Returns `None` when the request is absent.
    async fn update_status(
        &self,
        id: RideRequestId,
        status: RideRequestStatus,
    ) -> Result<Option<RideRequest>, RideRequestRepositoryError>;
}
