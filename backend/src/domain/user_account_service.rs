//! Account registration and public profiles.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    RegisterUserRequest, UpdateProfileRequest, UserAccountsCommand, UserAccountsQuery,
    UserRepository,
};
use crate::domain::service_support::{map_user_repository_error, validation_error};
use crate::domain::{Error, NewUser, UserId, UserPatch, UserProfile, UserValidationError};

fn invalid_user_input(err: UserValidationError) -> Error {
    let field = err.field();
    validation_error(err, field)
}

/// Account service implementing the user account ports.
#[derive(Clone)]
pub struct UserAccountService<U> {
    user_repo: Arc<U>,
}

impl<U> UserAccountService<U> {
    /// Create a new account service.
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> UserAccountsCommand for UserAccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error> {
        let new_user = NewUser::try_from(request.draft).map_err(invalid_user_input)?;

        let username_taken = self
            .user_repo
            .find_by_username(new_user.username.as_ref())
            .await
            .map_err(map_user_repository_error)?
            .is_some();
        if username_taken {
            return Err(Error::invalid_request("username already taken"));
        }
        let email_taken = self
            .user_repo
            .find_by_email(new_user.email.as_ref())
            .await
            .map_err(map_user_repository_error)?
            .is_some();
        if email_taken {
            return Err(Error::invalid_request("email already registered"));
        }

        let user = self
            .user_repo
            .create(new_user)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user.profile())
    }

    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile, Error> {
        let user_id = request.caller.require()?;
        let patch = UserPatch::try_from(request.update).map_err(invalid_user_input)?;

        self.user_repo
            .update(user_id, patch)
            .await
            .map_err(map_user_repository_error)?
            .map(|user| user.profile())
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[async_trait]
impl<U> UserAccountsQuery for UserAccountService<U>
where
    U: UserRepository,
{
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .map(|user| user.profile())
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
