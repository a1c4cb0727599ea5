//! Internal helpers shared by the marketplace services.

use std::fmt;

use serde_json::json;

use crate::domain::ports::{
    MessageRepositoryError, ReviewRepositoryError, RideRepository, RideRepositoryError,
    RideRequestRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, Ride, RideId, RidePatch, UserId, UserSummary};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_ride_repository_error(error: RideRepositoryError) -> Error {
    match error {
        RideRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ride repository unavailable: {message}"))
        }
        RideRepositoryError::Query { message } => {
            Error::internal(format!("ride repository error: {message}"))
        }
    }
}

pub(crate) fn map_ride_request_repository_error(error: RideRequestRepositoryError) -> Error {
    match error {
        RideRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ride request repository unavailable: {message}"))
        }
        RideRequestRepositoryError::Query { message } => {
            Error::internal(format!("ride request repository error: {message}"))
        }
    }
}

pub(crate) fn map_message_repository_error(error: MessageRepositoryError) -> Error {
    match error {
        MessageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("message repository unavailable: {message}"))
        }
        MessageRepositoryError::Query { message } => {
            Error::internal(format!("message repository error: {message}"))
        }
    }
}

pub(crate) fn map_review_repository_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
    }
}

/// Convert a value-type validation failure into `InvalidRequest`, naming the
/// offending input field in the details.
pub(crate) fn validation_error(error: impl fmt::Display, field: &str) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "validation_failed",
    }))
}

/// Public summary of `user_id`, or `None` when the record is missing.
pub(crate) async fn lookup_summary<U>(
    users: &U,
    user_id: UserId,
) -> Result<Option<UserSummary>, Error>
where
    U: UserRepository + ?Sized,
{
    let user = users
        .find_by_id(user_id)
        .await
        .map_err(map_user_repository_error)?;
    if user.is_none() {
        tracing::warn!(user_id = %user_id, "referenced user is missing");
    }
    Ok(user.map(|user| user.summary()))
}

/// Take one seat from a ride, leaving a full ride at zero.
///
/// The decrement reads the stored count inside the repository update, so it
/// never acts on a stale copy of the ride.
pub(crate) async fn consume_seat<R>(rides: &R, ride_id: RideId) -> Result<Option<Ride>, Error>
where
    R: RideRepository + ?Sized,
{
    let updated = rides
        .update(ride_id, RidePatch::consume_seat())
        .await
        .map_err(map_ride_repository_error)?;
    if let Some(ride) = &updated {
        tracing::debug!(ride_id = %ride_id, available_seats = ride.available_seats, "seat consumed");
    }
    Ok(updated)
}
