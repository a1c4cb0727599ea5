//! Driving port for public profile lookups.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

/// Driving port for account read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsQuery: Send + Sync {
    /// Public profile of a user; never includes the credential.
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, Error>;
}
