//! `RideRequestRepository` over the seat request arena.

use async_trait::async_trait;

use crate::domain::ports::{RideRequestRepository, RideRequestRepositoryError};
use crate::domain::{
    NewRideRequest, RideId, RideRequest, RideRequestId, RideRequestStatus, UserId,
};

use super::{InMemoryStore, sort_newest_first};

fn newest_first(mut requests: Vec<RideRequest>) -> Vec<RideRequest> {
    sort_newest_first(&mut requests, |request| (request.created_at, request.id.get()));
    requests
}

fn pending(id: u64, request: NewRideRequest) -> RideRequest {
    RideRequest {
        id: RideRequestId::new(id),
        ride_id: request.ride_id,
        user_id: request.user_id,
        status: RideRequestStatus::Pending,
        message: request.message,
        created_at: request.created_at,
    }
}

#[async_trait]
impl RideRequestRepository for InMemoryStore {
    async fn create(
        &self,
        request: NewRideRequest,
    ) -> Result<RideRequest, RideRequestRepositoryError> {
        Ok(self.ride_requests.write().await.insert_with(|id| pending(id, request)))
    }

    async fn create_unique(
        &self,
        request: NewRideRequest,
    ) -> Result<Option<RideRequest>, RideRequestRepositoryError> {
        let mut requests = self.ride_requests.write().await;
        let taken = requests
            .find(|existing| {
                existing.ride_id == request.ride_id && existing.user_id == request.user_id
            })
            .is_some();
        if taken {
            return Ok(None);
        }
        Ok(Some(requests.insert_with(|id| pending(id, request))))
    }

    async fn find_by_id(
        &self,
        id: RideRequestId,
    ) -> Result<Option<RideRequest>, RideRequestRepositoryError> {
        Ok(self.ride_requests.read().await.get(id.get()))
    }

    async fn list_by_ride(
        &self,
        ride: RideId,
    ) -> Result<Vec<RideRequest>, RideRequestRepositoryError> {
        let requests = self
            .ride_requests
            .read()
            .await
            .select(|request| request.ride_id == ride);
        Ok(newest_first(requests))
    }

    async fn list_by_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<RideRequest>, RideRequestRepositoryError> {
        let requests = self
            .ride_requests
            .read()
            .await
            .select(|request| request.user_id == requester);
        Ok(newest_first(requests))
    }

    async fn update_status(
        &self,
        id: RideRequestId,
        status: RideRequestStatus,
    ) -> Result<Option<RideRequest>, RideRequestRepositoryError> {
        Ok(self
            .ride_requests
            .write()
            .await
            .replace_with(id.get(), |request| request.status = status))
    }
}
