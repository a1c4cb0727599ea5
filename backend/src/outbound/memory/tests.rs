//! Behavioural coverage for the in-memory entity store.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MessageRepository, ReviewRepository, RideRepository, RideRequestRepository, UserRepository,
};
use crate::domain::{
    MessageContent, NewMessage, NewReview, NewRide, NewRideRequest, NewUser, Rating,
    RegistrationDraft, RideFilter, RideId, RidePatch, RideRequestStatus, RideType, UserId,
    UserPatch,
};

#[fixture]
fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser::try_from(RegistrationDraft {
        username: username.to_owned(),
        password: "opaque".to_owned(),
        full_name: "Test Rider".to_owned(),
        email: email.to_owned(),
        college: None,
        department: None,
    })
    .expect("valid registration")
}

fn new_ride(owner: u64, departs: DateTime<Utc>, seats: u32) -> NewRide {
    NewRide {
        user_id: UserId::new(owner),
        ride_type: RideType::Offer,
        pickup_location: "North Gate".to_owned(),
        destination: "Central Station".to_owned(),
        date_time: departs,
        available_seats: seats,
        price: 300,
        notes: None,
        created_at: departs,
    }
}

fn new_message(from: u64, to: u64, at: DateTime<Utc>) -> NewMessage {
    NewMessage {
        sender_id: UserId::new(from),
        receiver_id: UserId::new(to),
        content: MessageContent::new("ping").expect("valid content"),
        created_at: at,
    }
}

#[rstest]
#[tokio::test]
async fn ride_ids_are_never_reused(store: InMemoryStore, t0: DateTime<Utc>) {
    let first = RideRepository::create(&store, new_ride(1, t0, 2))
        .await
        .expect("create");
    let second = RideRepository::create(&store, new_ride(1, t0, 2))
        .await
        .expect("create");
    assert_eq!((first.id.get(), second.id.get()), (1, 2));

    assert!(RideRepository::delete(&store, second.id).await.expect("delete"));
    assert!(!RideRepository::delete(&store, second.id).await.expect("delete"));
    let third = RideRepository::create(&store, new_ride(1, t0, 2))
        .await
        .expect("create");
    assert_eq!(third.id.get(), 3);
}

#[rstest]
#[tokio::test]
async fn collections_count_independently(store: InMemoryStore, t0: DateTime<Utc>) {
    RideRepository::create(&store, new_ride(1, t0, 2))
        .await
        .expect("create ride");
    let user = UserRepository::create(&store, new_user("first", "first@campus.test"))
        .await
        .expect("create user");
    assert_eq!(user.id.get(), 1);
    assert_eq!(user.rating.total_reviews, 0);
}

#[rstest]
#[tokio::test]
async fn username_and_email_lookups_ignore_case(store: InMemoryStore) {
    UserRepository::create(&store, new_user("Dana_K", "Dana@Campus.test"))
        .await
        .expect("create user");

    let by_name = store.find_by_username("dana_k").await.expect("lookup");
    let by_email = store.find_by_email("DANA@campus.TEST").await.expect("lookup");
    assert!(by_name.is_some());
    assert!(by_email.is_some());
    assert!(store.find_by_username("dana").await.expect("lookup").is_none());
}

#[rstest]
#[tokio::test]
async fn user_patch_replaces_only_given_fields(store: InMemoryStore) {
    let user = UserRepository::create(&store, new_user("erin", "erin@campus.test"))
        .await
        .expect("create user");

    let updated = UserRepository::update(
        &store,
        user.id,
        UserPatch {
            bio: Some("night owl".to_owned()),
            ..UserPatch::default()
        },
    )
    .await
    .expect("update")
    .expect("user exists");

    assert_eq!(updated.bio.as_deref(), Some("night owl"));
    assert_eq!(updated.full_name, "Test Rider");
    assert!(
        UserRepository::update(&store, UserId::new(99), UserPatch::default())
            .await
            .expect("update")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn ride_listing_filters_and_orders(store: InMemoryStore, t0: DateTime<Utc>) {
    for (departs, seats) in [
        (t0, 2),
        (t0 + Duration::days(2), 0),
        (t0 + Duration::days(1), 1),
    ] {
        RideRepository::create(&store, new_ride(1, departs, seats))
            .await
            .expect("create ride");
    }

    let open = store
        .list(&RideFilter {
            available_seats: Some(1),
            ..RideFilter::default()
        })
        .await
        .expect("list");
    let ids: Vec<u64> = open.iter().map(|ride| ride.id.get()).collect();
    assert_eq!(ids, vec![3, 1]);

    let mine = store.list_by_owner(UserId::new(1)).await.expect("list");
    assert_eq!(mine.len(), 3);
    assert_eq!(mine.first().map(|ride| ride.id.get()), Some(2));
}

#[rstest]
#[tokio::test]
async fn seat_consumption_reads_stored_count(store: InMemoryStore, t0: DateTime<Utc>) {
    let ride = RideRepository::create(&store, new_ride(1, t0, 1))
        .await
        .expect("create ride");

    let once = RideRepository::update(&store, ride.id, RidePatch::consume_seat())
        .await
        .expect("update")
        .expect("ride exists");
    let twice = RideRepository::update(&store, ride.id, RidePatch::consume_seat())
        .await
        .expect("update")
        .expect("ride exists");

    assert_eq!(once.available_seats, 0);
    assert_eq!(twice.available_seats, 0);
    assert!(
        RideRepository::update(&store, RideId::new(42), RidePatch::consume_seat())
            .await
            .expect("update")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn requests_start_pending_and_list_newest_first(store: InMemoryStore, t0: DateTime<Utc>) {
    for (ride, offset) in [(1, 0), (2, 5), (3, 5)] {
        RideRequestRepository::create(
            &store,
            NewRideRequest {
                ride_id: RideId::new(ride),
                user_id: UserId::new(8),
                message: None,
                created_at: t0 + Duration::minutes(offset),
            },
        )
        .await
        .expect("create request");
    }

    let mine = store.list_by_requester(UserId::new(8)).await.expect("list");
    let ids: Vec<u64> = mine.iter().map(|request| request.id.get()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert!(
        mine.iter()
            .all(|request| request.status == RideRequestStatus::Pending)
    );

    let decided = store
        .update_status(mine[0].id, RideRequestStatus::Rejected)
        .await
        .expect("update")
        .expect("request exists");
    assert_eq!(decided.status, RideRequestStatus::Rejected);
    assert_eq!(
        store.list_by_ride(RideId::new(3)).await.expect("list").len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn message_threads_and_read_marks(store: InMemoryStore, t0: DateTime<Utc>) {
    let first = MessageRepository::create(&store, new_message(1, 2, t0))
        .await
        .expect("send");
    MessageRepository::create(&store, new_message(2, 1, t0 + Duration::minutes(1)))
        .await
        .expect("send");
    MessageRepository::create(&store, new_message(1, 3, t0 + Duration::minutes(2)))
        .await
        .expect("send");

    let thread = store
        .list_between(UserId::new(2), UserId::new(1))
        .await
        .expect("thread");
    let ids: Vec<u64> = thread.iter().map(|message| message.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);

    let inbox = store.list_for_user(UserId::new(1)).await.expect("inbox");
    let ids: Vec<u64> = inbox.iter().map(|message| message.id.get()).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let read = store
        .mark_read(first.id)
        .await
        .expect("mark")
        .expect("message exists");
    let again = store
        .mark_read(first.id)
        .await
        .expect("mark")
        .expect("message exists");
    assert!(read.is_read && again.is_read);
}

#[rstest]
#[tokio::test]
async fn reviews_list_by_either_party(store: InMemoryStore, t0: DateTime<Utc>) {
    for (reviewer, reviewee, offset) in [(1, 2, 0), (3, 2, 1), (2, 1, 2)] {
        ReviewRepository::create(
            &store,
            NewReview {
                ride_id: RideId::new(1),
                reviewer_id: UserId::new(reviewer),
                reviewee_id: UserId::new(reviewee),
                rating: Rating::new(4).expect("valid rating"),
                comment: None,
                created_at: t0 + Duration::minutes(offset),
            },
        )
        .await
        .expect("create review");
    }

    let received = store.list_by_reviewee(UserId::new(2)).await.expect("list");
    let ids: Vec<u64> = received.iter().map(|review| review.id.get()).collect();
    assert_eq!(ids, vec![2, 1]);

    let written = store.list_by_reviewer(UserId::new(2)).await.expect("list");
    assert_eq!(written.len(), 1);
}

fn request_for(ride: u64, requester: u64, at: DateTime<Utc>) -> NewRideRequest {
    NewRideRequest {
        ride_id: RideId::new(ride),
        user_id: UserId::new(requester),
        message: None,
        created_at: at,
    }
}

#[rstest]
#[case(RideRequestStatus::Pending)]
#[case(RideRequestStatus::Rejected)]
#[tokio::test]
async fn unique_request_refuses_pair_in_any_status(
    store: InMemoryStore,
    t0: DateTime<Utc>,
    #[case] earlier: RideRequestStatus,
) {
    let first = store
        .create_unique(request_for(4, 9, t0))
        .await
        .expect("create")
        .expect("first request stored");
    store
        .update_status(first.id, earlier)
        .await
        .expect("update")
        .expect("request exists");

    let again = store
        .create_unique(request_for(4, 9, t0))
        .await
        .expect("create");
    let other_ride = store
        .create_unique(request_for(5, 9, t0))
        .await
        .expect("create");

    assert!(again.is_none());
    assert_eq!(other_ride.map(|request| request.id.get()), Some(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_unique_requests_store_one(t0: DateTime<Utc>) {
    let store = Arc::new(InMemoryStore::new());
    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create_unique(request_for(1, 2, t0)).await })
        })
        .collect();

    let mut stored = 0;
    for attempt in attempts {
        if attempt.await.expect("task joins").expect("create").is_some() {
            stored += 1;
        }
    }
    assert_eq!(stored, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ratings_are_all_counted() {
    let store = Arc::new(InMemoryStore::new());
    let user = UserRepository::create(store.as_ref(), new_user("driver", "driver@campus.test"))
        .await
        .expect("create user");
    let user_id = user.id;
    let rating = Rating::new(5).expect("valid rating");

    let updates: Vec<_> = (0..64)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                UserRepository::update(store.as_ref(), user_id, UserPatch::record_rating(rating))
                    .await
            })
        })
        .collect();
    for update in updates {
        update.await.expect("task joins").expect("update");
    }

    let stored = UserRepository::find_by_id(store.as_ref(), user_id)
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(stored.rating.total_reviews, 64);
    assert_eq!(stored.rating.avg_rating, 5);
}

#[rstest]
#[tokio::test]
async fn withdrawn_reviews_disappear(store: InMemoryStore, t0: DateTime<Utc>) {
    let review = ReviewRepository::create(
        &store,
        NewReview {
            ride_id: RideId::new(1),
            reviewer_id: UserId::new(2),
            reviewee_id: UserId::new(1),
            rating: Rating::new(2).expect("valid rating"),
            comment: None,
            created_at: t0,
        },
    )
    .await
    .expect("create review");

    assert!(ReviewRepository::delete(&store, review.id).await.expect("delete"));
    assert!(!ReviewRepository::delete(&store, review.id).await.expect("delete"));
    assert!(store.list_by_reviewee(UserId::new(1)).await.expect("list").is_empty());
}
