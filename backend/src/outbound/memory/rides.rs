//! `RideRepository` over the ride arena.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{RideRepository, RideRepositoryError};
use crate::domain::{
    NewRide, Ride, RideFilter, RideId, RidePatch, RideStatus, UserId, by_departure_desc,
};

use super::InMemoryStore;

#[async_trait]
impl RideRepository for InMemoryStore {
    async fn create(&self, ride: NewRide) -> Result<Ride, RideRepositoryError> {
        let created = self.rides.write().await.insert_with(|id| Ride {
            id: RideId::new(id),
            user_id: ride.user_id,
            ride_type: ride.ride_type,
            pickup_location: ride.pickup_location,
            destination: ride.destination,
            date_time: ride.date_time,
            available_seats: ride.available_seats,
            price: ride.price,
            notes: ride.notes,
            status: RideStatus::Active,
            created_at: ride.created_at,
        });
        debug!(ride_id = %created.id, "ride stored");
        Ok(created)
    }

    async fn find_by_id(&self, id: RideId) -> Result<Option<Ride>, RideRepositoryError> {
        Ok(self.rides.read().await.get(id.get()))
    }

    async fn list(&self, filter: &RideFilter) -> Result<Vec<Ride>, RideRepositoryError> {
        let mut rides = self.rides.read().await.select(|ride| filter.matches(ride));
        rides.sort_by(by_departure_desc);
        Ok(rides)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Ride>, RideRepositoryError> {
        let mut rides = self.rides.read().await.select(|ride| ride.user_id == owner);
        rides.sort_by(by_departure_desc);
        Ok(rides)
    }

    async fn update(
        &self,
        id: RideId,
        patch: RidePatch,
    ) -> Result<Option<Ride>, RideRepositoryError> {
        Ok(self
            .rides
            .write()
            .await
            .replace_with(id.get(), |ride| patch.apply(ride)))
    }

    async fn delete(&self, id: RideId) -> Result<bool, RideRepositoryError> {
        let removed = self.rides.write().await.remove(id.get());
        debug!(ride_id = %id, removed, "ride removal attempted");
        Ok(removed)
    }
}
