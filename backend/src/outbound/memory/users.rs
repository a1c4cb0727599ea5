//! `UserRepository` over the user arena.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, RatingSummary, User, UserId, UserPatch};

use super::InMemoryStore;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let created = self.users.write().await.insert_with(|id| User {
            id: UserId::new(id),
            username: user.username,
            credential: user.credential,
            full_name: user.full_name,
            email: user.email,
            college: user.college,
            department: user.department,
            bio: None,
            profile_image: None,
            rating: RatingSummary::default(),
        });
        debug!(user_id = %created.id, "user stored");
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.read().await.get(id.get()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .find(|user| user.username.matches(username)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.read().await.find(|user| user.email.matches(email)))
    }

    async fn update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .users
            .write()
            .await
            .replace_with(id.get(), |user| patch.apply(user)))
    }
}
