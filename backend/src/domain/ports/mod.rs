//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe the entity store the services need;
//! each exposes a typed error enum so adapters report failures as predictable
//! variants. Driving ports (`*Command`, `*Query`) are what a request handler
//! calls once it has resolved the caller and parsed input.

mod macros;
pub(crate) use macros::define_port_error;

mod message_repository;
mod messaging_command;
mod messaging_query;
mod review_repository;
mod reviews_command;
mod reviews_query;
mod ride_repository;
mod ride_request_repository;
mod ride_requests_command;
mod ride_requests_query;
mod rides_command;
mod rides_query;
mod user_accounts_command;
mod user_accounts_query;
mod user_repository;

#[cfg(test)]
pub use message_repository::MockMessageRepository;
pub use message_repository::{MessageRepository, MessageRepositoryError};
#[cfg(test)]
pub use messaging_command::MockMessagingCommand;
pub use messaging_command::{MessagingCommand, OpenConversationRequest, SendMessageRequest};
#[cfg(test)]
pub use messaging_query::MockMessagingQuery;
pub use messaging_query::MessagingQuery;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use reviews_command::MockReviewsCommand;
pub use reviews_command::{CreateReviewRequest, ReviewsCommand};
#[cfg(test)]
pub use reviews_query::MockReviewsQuery;
pub use reviews_query::ReviewsQuery;
#[cfg(test)]
pub use ride_repository::MockRideRepository;
pub use ride_repository::{RideRepository, RideRepositoryError};
#[cfg(test)]
pub use ride_request_repository::MockRideRequestRepository;
pub use ride_request_repository::{RideRequestRepository, RideRequestRepositoryError};
#[cfg(test)]
pub use ride_requests_command::MockRideRequestsCommand;
pub use ride_requests_command::{CreateSeatRequest, DecideSeatRequest, RideRequestsCommand};
#[cfg(test)]
pub use ride_requests_query::MockRideRequestsQuery;
pub use ride_requests_query::RideRequestsQuery;
#[cfg(test)]
pub use rides_command::MockRidesCommand;
pub use rides_command::{CreateRideRequest, DeleteRideRequest, RidesCommand, UpdateRideRequest};
#[cfg(test)]
pub use rides_query::MockRidesQuery;
pub use rides_query::RidesQuery;
#[cfg(test)]
pub use user_accounts_command::MockUserAccountsCommand;
pub use user_accounts_command::{RegisterUserRequest, UpdateProfileRequest, UserAccountsCommand};
#[cfg(test)]
pub use user_accounts_query::MockUserAccountsQuery;
pub use user_accounts_query::UserAccountsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
