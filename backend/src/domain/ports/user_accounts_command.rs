//! Driving port for account registration and profile edits.

use async_trait::async_trait;

use crate::domain::{Caller, Error, ProfileUpdate, RegistrationDraft, UserProfile};

/// Register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub draft: RegistrationDraft,
}

/// Edit the caller's own profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub caller: Caller,
    pub update: ProfileUpdate,
}

/// Driving port for account write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Create an account with an empty rating.
    ///
    /// Usernames and email addresses are unique ignoring case.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error>;

    /// Update the caller's full name, college, department, or bio.
    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile, Error>;
}
