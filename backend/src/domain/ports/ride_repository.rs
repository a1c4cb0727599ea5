//! Port abstraction for ride persistence.
use async_trait::async_trait;

use crate::domain::{NewRide, Ride, RideFilter, RideId, RidePatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ride repository adapters.
    pub enum RideRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ride repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ride repository query failed: {message}",
    }
}

/// Port for posted rides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Insert a ride and assign the next identifier.
    async fn create(&self, ride: NewRide) -> Result<Ride, RideRepositoryError>;

    /// Fetch a ride by identifier.
    async fn find_by_id(&self, id: RideId) -> Result<Option<Ride>, RideRepositoryError>;

    /// Rides matching `filter`, latest departure first.
    async fn list(&self, filter: &RideFilter) -> Result<Vec<Ride>, RideRepositoryError>;

    /// Every ride posted by `owner` regardless of status, latest departure
    /// first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Ride>, RideRepositoryError>;

    /// Apply `patch` to a stored ride as a single record replacement.
    ///
    /// Returns `None` when the ride is absent.
    async fn update(&self, id: RideId, patch: RidePatch)
    -> Result<Option<Ride>, RideRepositoryError>;

    /// Remove a ride. Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: RideId) -> Result<bool, RideRepositoryError>;
}
