//! Composition root for the marketplace driving ports.
//!
//! A request handler holds a [`Marketplace`] and only ever talks to the
//! ports inside it, so it stays testable without any storage.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    MessagingCommand, MessagingQuery, ReviewsCommand, ReviewsQuery, RideRequestsCommand,
    RideRequestsQuery, RidesCommand, RidesQuery, UserAccountsCommand, UserAccountsQuery,
};
use crate::domain::{
    MessagingService, ReviewService, RideRequestService, RideService, UserAccountService,
};
use crate::outbound::memory::InMemoryStore;
use crate::settings::MarketplaceSettings;

/// Dependency bundle of every driving port.
#[derive(Clone)]
pub struct Marketplace {
    pub rides: Arc<dyn RidesCommand>,
    pub rides_query: Arc<dyn RidesQuery>,
    pub ride_requests: Arc<dyn RideRequestsCommand>,
    pub ride_requests_query: Arc<dyn RideRequestsQuery>,
    pub messaging: Arc<dyn MessagingCommand>,
    pub messaging_query: Arc<dyn MessagingQuery>,
    pub reviews: Arc<dyn ReviewsCommand>,
    pub reviews_query: Arc<dyn ReviewsQuery>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub accounts_query: Arc<dyn UserAccountsQuery>,
}

impl Marketplace {
    /// Wire every service to one shared [`InMemoryStore`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use rideshare::{Marketplace, MarketplaceSettings};
    ///
    /// let settings = MarketplaceSettings::default();
    /// let marketplace = Marketplace::in_memory(&settings, Arc::new(DefaultClock));
    /// let _rides = Arc::clone(&marketplace.rides_query);
    /// ```
    pub fn in_memory(settings: &MarketplaceSettings, clock: Arc<dyn Clock>) -> Self {
        Self::with_store(settings, Arc::new(InMemoryStore::new()), clock)
    }

    /// Wire every service to `store`.
    pub fn with_store(
        settings: &MarketplaceSettings,
        store: Arc<InMemoryStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rides = Arc::new(
            RideService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&clock))
                .with_max_seats(settings.max_seats()),
        );
        let ride_requests = Arc::new(
            RideRequestService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&clock),
            )
            .with_policy(settings.decision_policy()),
        );
        let messaging = Arc::new(MessagingService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&clock),
        ));
        let reviews = Arc::new(ReviewService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            clock,
        ));
        let accounts = Arc::new(UserAccountService::new(store));
        info!(
            max_seats = settings.max_seats(),
            lock_decided_requests = settings.lock_decided_requests,
            "marketplace wired to in-memory store"
        );

        Self {
            rides: rides.clone(),
            rides_query: rides,
            ride_requests: ride_requests.clone(),
            ride_requests_query: ride_requests,
            messaging: messaging.clone(),
            messaging_query: messaging,
            reviews: reviews.clone(),
            reviews_query: reviews,
            accounts: accounts.clone(),
            accounts_query: accounts,
        }
    }
}
