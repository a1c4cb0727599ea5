//! In-memory entity store.
//!
//! [`InMemoryStore`] implements every repository port over one arena per
//! collection. Each arena sits behind its own `tokio::sync::RwLock`; a
//! mutation replaces a whole record while holding the write lock, so
//! concurrent updates to one record resolve as last writer wins and never
//! interleave field by field.

mod collection;
mod messages;
mod ride_requests;
mod rides;
mod reviews;
mod users;

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{Message, Review, Ride, RideRequest, User};

use self::collection::Collection;

/// Entity store keeping all five collections in process memory.
///
/// Cheap to share behind an `Arc`; every service in a marketplace holds the
/// same instance.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use rideshare::outbound::memory::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::new());
/// let shared = Arc::clone(&store);
/// assert_eq!(Arc::strong_count(&shared), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Collection<User>>,
    rides: RwLock<Collection<Ride>>,
    ride_requests: RwLock<Collection<RideRequest>>,
    messages: RwLock<Collection<Message>>,
    reviews: RwLock<Collection<Review>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sort by creation time, newest first, breaking ties by higher id.
fn sort_newest_first<T>(records: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, u64)) {
    records.sort_by_key(|record| Reverse(key(record)));
}

#[cfg(test)]
mod tests;
