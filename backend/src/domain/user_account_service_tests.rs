//! Tests for account registration and profiles.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockUserRepository, UserRepositoryError};
use crate::domain::{
    Caller, ErrorCode, ProfileUpdate, RatingSummary, RegistrationDraft, User,
};

fn sample_draft() -> RegistrationDraft {
    RegistrationDraft {
        username: "grace_h".to_owned(),
        password: "opaque-hash".to_owned(),
        full_name: "Grace Hopper".to_owned(),
        email: "grace@campus.test".to_owned(),
        college: Some("Navy".to_owned()),
        department: None,
    }
}

#[fixture]
fn draft() -> RegistrationDraft {
    sample_draft()
}

fn existing_user() -> User {
    created(NewUser::try_from(sample_draft()).expect("valid draft"))
}

fn created(new: NewUser) -> User {
    User {
        id: UserId::new(1),
        username: new.username,
        credential: new.credential,
        full_name: new.full_name,
        email: new.email,
        college: new.college,
        department: new.department,
        bio: None,
        profile_image: None,
        rating: RatingSummary::default(),
    }
}

fn register(users: MockUserRepository) -> UserAccountService<MockUserRepository> {
    UserAccountService::new(Arc::new(users))
}

#[rstest]
#[tokio::test]
async fn registration_starts_with_empty_rating(draft: RegistrationDraft) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().return_once(|_| Ok(None));
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .return_once(|new| Ok(created(new)));

    let profile = register(users)
        .register(RegisterUserRequest { draft })
        .await
        .expect("registration succeeds");

    assert_eq!(profile.username, "grace_h");
    assert_eq!(profile.avg_rating, 0);
    assert_eq!(profile.total_reviews, 0);
}

#[rstest]
#[tokio::test]
async fn taken_username_is_rejected(draft: RegistrationDraft) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(existing_user())));
    users.expect_create().never();

    let err = register(users)
        .register(RegisterUserRequest { draft })
        .await
        .expect_err("username taken");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "username already taken");
}

#[rstest]
#[tokio::test]
async fn invalid_email_names_the_field(mut draft: RegistrationDraft) {
    draft.email = "not-an-address".to_owned();
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().never();

    let err = register(users)
        .register(RegisterUserRequest { draft })
        .await
        .expect_err("invalid email");

    let details = err.details().expect("validation details");
    assert_eq!(details["field"], "email");
}

#[rstest]
#[tokio::test]
async fn profile_update_targets_the_caller() {
    let mut users = MockUserRepository::new();
    users
        .expect_update()
        .withf(|id, patch| *id == UserId::new(3) && patch.bio.as_deref() == Some("cyclist"))
        .return_once(|_, patch| {
            let mut user = existing_user();
            patch.apply(&mut user);
            Ok(Some(user))
        });

    let profile = register(users)
        .update_profile(UpdateProfileRequest {
            caller: Caller::authenticated(UserId::new(3)),
            update: ProfileUpdate {
                bio: Some("cyclist".to_owned()),
                ..ProfileUpdate::default()
            },
        })
        .await
        .expect("profile updated");

    assert_eq!(profile.bio.as_deref(), Some("cyclist"));
}

#[rstest]
#[tokio::test]
async fn profile_update_requires_login() {
    let err = register(MockUserRepository::new())
        .update_profile(UpdateProfileRequest {
            caller: Caller::anonymous(),
            update: ProfileUpdate::default(),
        })
        .await
        .expect_err("anonymous edit");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(UserRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(UserRepositoryError::query("bad row"), ErrorCode::InternalError)]
#[tokio::test]
async fn profile_lookup_maps_store_failures(
    #[case] failure: UserRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(move |_| Err(failure));

    let err = register(users)
        .get_profile(UserId::new(1))
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), expected);
}
