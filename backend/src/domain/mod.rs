//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the marketplace entities (users, rides, seat requests,
//! messages, reviews), the pure algorithms over them (ride filtering,
//! conversation folding, the rounded rating mean), and the services that
//! implement the driving ports on top of the repository ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Caller: identity of whoever invoked an operation, if anyone.
//! - Entity types and their validated input drafts.
//! - `*Service` types implementing the driving ports in [`ports`].

pub mod caller;
pub mod conversation;
pub mod error;
pub mod ids;
pub mod message;
pub mod ports;
pub mod review;
pub mod ride;
pub mod ride_request;
pub mod user;

mod messaging_service;
mod review_service;
mod ride_request_service;
mod ride_service;
mod service_support;
mod user_account_service;

pub use self::caller::Caller;
pub use self::conversation::{ConversationSummary, ConversationThread, summarise_conversations};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{MessageId, ReviewId, RideId, RideRequestId, UserId};
pub use self::message::{Message, MessageContent, MessageValidationError, NewMessage};
pub use self::messaging_service::MessagingService;
pub use self::review::{
    NewReview, RATING_MAX, RATING_MIN, Rating, RatingSummary, Review, ReviewDraft,
    ReviewValidationError, ReviewWithReviewer,
};
pub use self::review_service::ReviewService;
pub use self::ride::{
    DEFAULT_MAX_SEATS, NewRide, ParseRideEnumError, Ride, RideDraft, RideFilter, RidePatch,
    RideStatus, RideType, RideValidationError, RideWithOwner, by_departure_desc,
};
pub use self::ride_request::{
    DecisionPolicy, NewRideRequest, ParseDecisionError, RequestDecision, RideRequest,
    RideRequestStatus, RideRequestWithRide, RideRequestWithUser,
};
pub use self::ride_request_service::RideRequestService;
pub use self::ride_service::RideService;
pub use self::user::{
    EmailAddress, NewUser, PasswordCredential, ProfileUpdate, RegistrationDraft, USERNAME_MAX,
    USERNAME_MIN, User, UserPatch, UserProfile, UserSummary, UserValidationError, Username,
};
pub use self::user_account_service::UserAccountService;

/// Convenient result alias for driving port operations.
///
/// # Examples
/// ```
/// use rideshare::domain::{DomainResult, Error};
///
/// fn guard() -> DomainResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(guard().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
