//! Tests for the ride lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockRideRepository, MockUserRepository, RideRepositoryError, UserRepositoryError,
};
use crate::domain::{
    EmailAddress, ErrorCode, PasswordCredential, RatingSummary, RideDraft, RidePatch, RideStatus,
    RideType, User, Username,
};
use crate::test_support::SteppingClock;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn clock_at(now: DateTime<Utc>) -> Arc<dyn Clock> {
    Arc::new(SteppingClock::frozen(now))
}

fn draft(now: DateTime<Utc>) -> RideDraft {
    RideDraft {
        ride_type: RideType::Offer,
        pickup_location: "Library".to_owned(),
        destination: "Airport".to_owned(),
        date_time: now,
        available_seats: 3,
        price: 1200,
        notes: None,
    }
}

fn stored_ride(id: u64, owner: u64, now: DateTime<Utc>) -> Ride {
    Ride {
        id: RideId::new(id),
        user_id: UserId::new(owner),
        ride_type: RideType::Offer,
        pickup_location: "Library".to_owned(),
        destination: "Airport".to_owned(),
        date_time: now,
        available_seats: 3,
        price: 1200,
        notes: None,
        status: RideStatus::Active,
        created_at: now,
    }
}

fn stored_user(id: u64) -> User {
    User {
        id: UserId::new(id),
        username: Username::new(format!("rider{id}")).expect("valid username"),
        credential: PasswordCredential::new("secret").expect("valid credential"),
        full_name: format!("Rider {id}"),
        email: EmailAddress::new(format!("rider{id}@campus.test")).expect("valid email"),
        college: None,
        department: None,
        bio: None,
        profile_image: None,
        rating: RatingSummary::default(),
    }
}

fn service(
    users: MockUserRepository,
    rides: MockRideRepository,
    now: DateTime<Utc>,
) -> RideService<MockUserRepository, MockRideRepository> {
    RideService::new(Arc::new(users), Arc::new(rides), clock_at(now))
}

#[rstest]
#[tokio::test]
async fn create_ride_uses_caller_as_owner(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides
        .expect_create()
        .withf(move |ride| ride.user_id == UserId::new(4) && ride.created_at == now)
        .times(1)
        .return_once(move |_| Ok(stored_ride(1, 4, now)));

    let ride = service(MockUserRepository::new(), rides, now)
        .create_ride(CreateRideRequest {
            caller: Caller::authenticated(UserId::new(4)),
            draft: draft(now),
        })
        .await
        .expect("ride created");

    assert_eq!(ride.status, RideStatus::Active);
    assert_eq!(ride.available_seats, 3);
}

#[rstest]
#[tokio::test]
async fn create_ride_requires_a_caller(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides.expect_create().never();

    let err = service(MockUserRepository::new(), rides, now)
        .create_ride(CreateRideRequest {
            caller: Caller::anonymous(),
            draft: draft(now),
        })
        .await
        .expect_err("anonymous callers cannot post");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn create_ride_reports_validation_field(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides.expect_create().never();
    let mut bad = draft(now);
    bad.available_seats = 8;

    let err = service(MockUserRepository::new(), rides, now)
        .create_ride(CreateRideRequest {
            caller: Caller::authenticated(UserId::new(1)),
            draft: bad,
        })
        .await
        .expect_err("too many seats");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "available seats must be between 1 and 7");
    let details = err.details().expect("validation details");
    assert_eq!(details["field"], "availableSeats");
}

#[rstest]
#[tokio::test]
async fn configured_seat_limit_applies(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides.expect_create().never();
    let mut bad = draft(now);
    bad.available_seats = 3;

    let err = service(MockUserRepository::new(), rides, now)
        .with_max_seats(2)
        .create_ride(CreateRideRequest {
            caller: Caller::authenticated(UserId::new(1)),
            draft: bad,
        })
        .await
        .expect_err("limit lowered to two seats");

    assert_eq!(err.message(), "available seats must be between 1 and 2");
}

#[rstest]
#[tokio::test]
async fn update_by_non_owner_is_forbidden(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_ride(1, 2, now))));
    rides.expect_update().never();

    let err = service(MockUserRepository::new(), rides, now)
        .update_ride(UpdateRideRequest {
            caller: Caller::authenticated(UserId::new(3)),
            ride_id: RideId::new(1),
            patch: RidePatch::default(),
        })
        .await
        .expect_err("only the owner may update");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_missing_ride_is_not_found(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(MockUserRepository::new(), rides, now)
        .update_ride(UpdateRideRequest {
            caller: Caller::authenticated(UserId::new(3)),
            ride_id: RideId::new(9),
            patch: RidePatch::default(),
        })
        .await
        .expect_err("ride does not exist");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn owner_patch_is_applied_unvalidated(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_ride(1, 2, now))));
    rides
        .expect_update()
        .withf(|_, patch| patch.available_seats == Some(40))
        .return_once(move |_, patch| {
            let mut ride = stored_ride(1, 2, now);
            patch.apply(&mut ride);
            Ok(Some(ride))
        });

    let ride = service(MockUserRepository::new(), rides, now)
        .update_ride(UpdateRideRequest {
            caller: Caller::authenticated(UserId::new(2)),
            ride_id: RideId::new(1),
            patch: RidePatch {
                available_seats: Some(40),
                ..RidePatch::default()
            },
        })
        .await
        .expect("owner may patch");

    assert_eq!(ride.available_seats, 40);
}

#[rstest]
#[tokio::test]
async fn delete_by_owner_removes_ride(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_ride(1, 2, now))));
    rides.expect_delete().times(1).return_once(|_| Ok(true));

    service(MockUserRepository::new(), rides, now)
        .delete_ride(DeleteRideRequest {
            caller: Caller::authenticated(UserId::new(2)),
            ride_id: RideId::new(1),
        })
        .await
        .expect("owner may delete");
}

#[rstest]
#[tokio::test]
async fn listing_joins_owner_summaries(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides
        .expect_list()
        .return_once(move |_| Ok(vec![stored_ride(2, 7, now), stored_ride(1, 8, now)]));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok((id == UserId::new(7)).then(|| stored_user(7))));

    let listed = service(users, rides, now)
        .list_rides(RideFilter::default())
        .await
        .expect("listing succeeds");

    assert_eq!(listed.len(), 2);
    assert_eq!(
        listed[0].user.as_ref().map(|u| u.username.as_str()),
        Some("rider7")
    );
    assert!(listed[1].user.is_none());
}

#[rstest]
#[case(RideRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(RideRepositoryError::query("broken"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_error_codes(
    now: DateTime<Utc>,
    #[case] failure: RideRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut rides = MockRideRepository::new();
    rides.expect_find_by_id().return_once(move |_| Err(failure));

    let err = service(MockUserRepository::new(), rides, now)
        .get_ride(RideId::new(1))
        .await
        .expect_err("repository failure surfaces");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn owner_lookup_failure_surfaces(now: DateTime<Utc>) {
    let mut rides = MockRideRepository::new();
    rides
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_ride(1, 2, now))));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserRepositoryError::connection("down")));

    let err = service(users, rides, now)
        .get_ride(RideId::new(1))
        .await
        .expect_err("owner lookup failed");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
