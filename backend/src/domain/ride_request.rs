//! Seat requests against rides and their decision state machine.
//!
//! A request starts `pending` and the ride owner moves it to `accepted` or
//! `rejected`. Whether a decided request may be decided again is a service
//! policy (see [`DecisionPolicy`]); the default keeps the permissive
//! behaviour where a second decision simply overwrites the first.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Ride, RideId, RideRequestId, UserId, UserSummary};

/// Request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RideRequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl RideRequestStatus {
    /// Whether the request has been decided.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Outcome an owner can give a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

impl From<RequestDecision> for RideRequestStatus {
    fn from(value: RequestDecision) -> Self {
        match value {
            RequestDecision::Accepted => Self::Accepted,
            RequestDecision::Rejected => Self::Rejected,
        }
    }
}

/// Error returned when parsing an unknown decision string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be accepted or rejected, got {input}")]
pub struct ParseDecisionError {
    input: String,
}

impl FromStr for RequestDecision {
    type Err = ParseDecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseDecisionError {
                input: other.to_owned(),
            }),
        }
    }
}

/// How decisions on already-decided requests are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionPolicy {
    /// Any request may be decided again; accepting again takes another seat.
    #[default]
    Permissive,
    /// Only pending requests may be decided.
    PendingOnly,
}

impl DecisionPolicy {
    /// Whether a request currently in `status` may be decided.
    pub const fn allows(self, status: RideRequestStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::PendingOnly => !status.is_terminal(),
        }
    }
}

/// Stored seat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub id: RideRequestId,
    pub ride_id: RideId,
    pub user_id: UserId,
    pub status: RideRequestStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request ready for insertion; always starts pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRideRequest {
    pub ride_id: RideId,
    pub user_id: UserId,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request joined with the requester's public summary, for the ride owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestWithUser {
    #[serde(flatten)]
    pub request: RideRequest,
    pub user: Option<UserSummary>,
}

/// Request joined with its ride, for the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestWithRide {
    #[serde(flatten)]
    pub request: RideRequest,
    /// `None` once the ride has been deleted.
    pub ride: Option<Ride>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DecisionPolicy::Permissive, RideRequestStatus::Accepted, true)]
    #[case(DecisionPolicy::Permissive, RideRequestStatus::Pending, true)]
    #[case(DecisionPolicy::PendingOnly, RideRequestStatus::Pending, true)]
    #[case(DecisionPolicy::PendingOnly, RideRequestStatus::Accepted, false)]
    #[case(DecisionPolicy::PendingOnly, RideRequestStatus::Rejected, false)]
    fn policy_gates_decisions(
        #[case] policy: DecisionPolicy,
        #[case] status: RideRequestStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(policy.allows(status), allowed);
    }

    #[rstest]
    fn decision_parsing_rejects_pending() {
        let err = "pending"
            .parse::<RequestDecision>()
            .expect_err("pending is not a decision");
        assert_eq!(err.to_string(), "status must be accepted or rejected, got pending");
    }

    #[rstest]
    fn status_serialises_in_snake_case() {
        let json = serde_json::to_string(&RideRequestStatus::Accepted).expect("serialise");
        assert_eq!(json, "\"accepted\"");
    }
}
